//! Level generation
//!
//! Levels 1-200 fall into four tiers, each with its own layout algorithm.
//! Tier boundaries and unlock thresholds are fixed; positions carry seeded
//! jitter so the same seed always reproduces the same catalogue.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::{HazardKind, HazardSpec};
use super::rect::Rect;
use crate::consts::{GROUND_HEIGHT, GROUND_Y, LEVEL_COUNT, PLAYFIELD_WIDTH};

/// Standard exit door size
const DOOR_SIZE: f32 = 40.0;
/// Door used by intermediate and advanced levels
const FIXED_DOOR: Rect = Rect::new(800.0, 370.0, DOOR_SIZE, DOOR_SIZE);
/// Spikes sit on the ground
const SPIKE_SIZE: f32 = 20.0;
const PLATFORM_HEIGHT: f32 = 20.0;

/// Difficulty band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Tutorial,
    Intermediate,
    Advanced,
    Expert,
}

impl Tier {
    /// Tier for a 1-based level number. Callers clamp into 1..=200 first;
    /// anything past 200 is treated as expert.
    pub fn for_level(level_number: u32) -> Self {
        match level_number {
            0..=10 => Tier::Tutorial,
            11..=50 => Tier::Intermediate,
            51..=150 => Tier::Advanced,
            _ => Tier::Expert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tutorial => "tutorial",
            Tier::Intermediate => "intermediate",
            Tier::Advanced => "advanced",
            Tier::Expert => "expert",
        }
    }

    /// Level numbers belonging to this tier
    pub fn levels(&self) -> RangeInclusive<u32> {
        match self {
            Tier::Tutorial => 1..=10,
            Tier::Intermediate => 11..=50,
            Tier::Advanced => 51..=150,
            Tier::Expert => 151..=LEVEL_COUNT,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Tier::Tutorial => "Tutorial",
            Tier::Intermediate => "Challenge",
            Tier::Advanced => "Advanced",
            Tier::Expert => "Expert",
        }
    }
}

/// A generated level. Platforms never change after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub id: u32,
    pub name: String,
    pub tier: Tier,
    /// Ground first, then the tier's layout
    pub platforms: Vec<Rect>,
    pub hazards: Vec<HazardSpec>,
    pub door: Rect,
    /// Controls start reversed
    pub reverse_controls: bool,
    /// Seconds allowed before the player is killed
    pub time_limit: Option<u32>,
}

impl Level {
    /// Number of hazards matching `pred`
    pub fn count_hazards(&self, pred: impl Fn(&HazardKind) -> bool) -> usize {
        self.hazards.iter().filter(|h| pred(&h.kind)).count()
    }
}

/// Full-width ground platform present in every level
pub fn ground() -> Rect {
    Rect::new(0.0, GROUND_Y, PLAYFIELD_WIDTH, GROUND_HEIGHT)
}

/// Seeded level generator
#[derive(Debug, Clone, Copy)]
pub struct LevelGenerator {
    seed: u64,
}

impl LevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Per-level RNG: same seed and level number, same stream
    fn rng_for(&self, level_number: u32) -> Pcg32 {
        let level_seed = (level_number as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        Pcg32::seed_from_u64(level_seed)
    }

    pub fn generate(&self, level_number: u32) -> Level {
        let mut rng = self.rng_for(level_number);
        generate_level(level_number, &mut rng)
    }
}

/// Generate one level from an explicit RNG
pub fn generate_level<R: Rng>(level_number: u32, rng: &mut R) -> Level {
    let tier = Tier::for_level(level_number);
    let level = match tier {
        Tier::Tutorial => tutorial(level_number, rng),
        Tier::Intermediate => intermediate(level_number, rng),
        Tier::Advanced => advanced(level_number),
        Tier::Expert => expert(level_number, rng),
    };
    log::trace!(
        "Generated {}: {} platforms, {} hazards",
        level.name,
        level.platforms.len(),
        level.hazards.len()
    );
    level
}

/// Whole-number jitter in `[min, max)`
fn jitter<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random_range(min..max).floor()
}

fn platform(x: f32, y: f32, width: f32) -> Rect {
    Rect::new(x, y, width, PLATFORM_HEIGHT)
}

fn ground_spike(x: f32) -> HazardSpec {
    HazardSpec::new(
        HazardKind::spike(),
        Rect::new(x, GROUND_Y - SPIKE_SIZE, SPIKE_SIZE, SPIKE_SIZE),
    )
}

fn level(
    n: u32,
    tier: Tier,
    platforms: Vec<Rect>,
    hazards: Vec<HazardSpec>,
    door: Rect,
    reverse_controls: bool,
    time_limit: u32,
) -> Level {
    Level {
        id: n,
        name: format!("{} {}", tier.title(), n),
        tier,
        platforms,
        hazards,
        door,
        reverse_controls,
        time_limit: Some(time_limit),
    }
}

fn tutorial<R: Rng>(n: u32, rng: &mut R) -> Level {
    let mut platforms = vec![ground()];
    if n >= 2 {
        platforms.push(platform(
            150.0 + jitter(rng, 0.0, 60.0),
            380.0 + jitter(rng, -20.0, 20.0),
            100.0 + jitter(rng, -20.0, 40.0),
        ));
    }
    if n >= 3 {
        platforms.push(platform(
            350.0 + jitter(rng, 0.0, 140.0),
            300.0 + jitter(rng, -30.0, 30.0),
            90.0 + jitter(rng, 0.0, 40.0),
        ));
    }
    if n >= 4 {
        platforms.push(platform(
            600.0 + jitter(rng, -50.0, 50.0),
            380.0 + jitter(rng, -10.0, 40.0),
            90.0 + jitter(rng, 0.0, 30.0),
        ));
    }

    let mut hazards = Vec::new();
    if n >= 5 {
        hazards.push(ground_spike(380.0 + jitter(rng, -50.0, 50.0)));
    }
    if n >= 7 {
        hazards.push(HazardSpec::new(
            HazardKind::DisappearingPlatform,
            platform(250.0 + jitter(rng, 0.0, 120.0), 380.0 + jitter(rng, -30.0, 30.0), 90.0),
        ));
    }
    if n >= 9 {
        hazards.push(HazardSpec::new(
            HazardKind::collapsing(),
            platform(520.0 + jitter(rng, -80.0, 80.0), 300.0 + jitter(rng, -20.0, 40.0), 100.0),
        ));
    }

    let door = Rect::new(
        780.0 + jitter(rng, -100.0, 40.0),
        360.0 + jitter(rng, -20.0, 20.0),
        DOOR_SIZE,
        DOOR_SIZE,
    );

    level(n, Tier::Tutorial, platforms, hazards, door, false, 120)
}

fn intermediate<R: Rng>(n: u32, rng: &mut R) -> Level {
    let step = n - 11;

    let mut platforms = vec![ground()];
    let platform_count = 4 + step / 10;
    let width_span = 140.0 - (n % 4) as f32 * 10.0;
    for _ in 0..platform_count {
        platforms.push(platform(
            jitter(rng, 60.0, 800.0),
            jitter(rng, 300.0, 440.0),
            60.0 + jitter(rng, 20.0, width_span),
        ));
    }

    let mut hazards = Vec::new();
    let spike_count = 2 + step / 15;
    for _ in 0..spike_count {
        hazards.push(ground_spike(jitter(rng, 120.0, 820.0)));
    }

    if n >= 15 {
        hazards.push(HazardSpec::new(
            HazardKind::DisappearingPlatform,
            platform(
                jitter(rng, 200.0, 700.0),
                jitter(rng, 320.0, 380.0),
                80.0 + jitter(rng, 0.0, 60.0),
            ),
        ));
    }
    if n >= 20 {
        hazards.push(HazardSpec::new(
            HazardKind::collapsing(),
            platform(
                jitter(rng, 300.0, 700.0),
                jitter(rng, 260.0, 340.0),
                80.0 + jitter(rng, 0.0, 60.0),
            ),
        ));
    }
    if n >= 30 {
        let rect = platform(
            jitter(rng, 200.0, 600.0),
            jitter(rng, 220.0, 320.0),
            80.0 + jitter(rng, 0.0, 80.0),
        );
        let start_x = jitter(rng, 100.0, 300.0);
        let end_x = jitter(rng, 500.0, 800.0);
        let speed = 2.0 + (n % 3) as f32;
        hazards.push(HazardSpec::new(
            HazardKind::oscillating(rect.x, Some(start_x), Some(end_x), Some(speed)),
            rect,
        ));
    }

    let time_limit = 90 + (step / 5) * 10;
    level(n, Tier::Intermediate, platforms, hazards, FIXED_DOOR, n >= 40, time_limit)
}

fn advanced(n: u32) -> Level {
    let mut platforms = vec![ground()];
    match n % 4 {
        // Spiral
        0 => {
            for i in 0..8 {
                let angle = i as f32 * 0.8;
                platforms.push(platform(100.0 + angle.cos() * 300.0, 400.0 - angle.sin() * 150.0, 60.0));
            }
        }
        // Zigzag
        1 => {
            for i in 0..10 {
                platforms.push(platform(100.0 + i as f32 * 80.0, 400.0 - (i % 2) as f32 * 100.0, 70.0));
            }
        }
        // Island clusters
        2 => {
            for i in 0..6 {
                platforms.push(platform(
                    150.0 + (i % 3) as f32 * 250.0,
                    450.0 - (i / 3) as f32 * 150.0,
                    80.0,
                ));
            }
        }
        // Staircase
        _ => {
            for i in 0..7 {
                platforms.push(platform(100.0 + i as f32 * 110.0, 450.0 - i as f32 * 40.0, 90.0));
            }
        }
    }

    let mut hazards = Vec::new();
    let hazard_count = 4 + (n - 51) / 20;
    let width = 80.0 + (n % 4) as f32 * 10.0;
    for i in 0..hazard_count {
        let rect = platform(
            200.0 + ((i * 150) % 700) as f32,
            450.0 - ((i * 30) % 200) as f32,
            width,
        );
        let kind = match i % 4 {
            0 => HazardKind::spike(),
            1 => HazardKind::DisappearingPlatform,
            2 => HazardKind::collapsing(),
            _ => HazardKind::oscillating(
                rect.x,
                Some(rect.x - 100.0),
                Some(rect.x + 100.0),
                Some(2.0 + (n % 4) as f32),
            ),
        };
        hazards.push(HazardSpec::new(kind, rect));
    }

    if n >= 70 {
        hazards.push(HazardSpec::new(
            HazardKind::InvisibleWall,
            Rect::new(600.0, 300.0, 20.0, 200.0),
        ));
    }
    if n >= 80 {
        hazards.push(HazardSpec::new(
            HazardKind::ReverseControlZone,
            Rect::new(400.0, 200.0, 200.0, 100.0),
        ));
    }

    let time_limit = 75 + ((n - 51) / 10) * 5;
    level(n, Tier::Advanced, platforms, hazards, FIXED_DOOR, n >= 90, time_limit)
}

fn expert<R: Rng>(n: u32, rng: &mut R) -> Level {
    let mut platforms = vec![ground()];
    match n % 6 {
        // Maze grid
        0 => {
            for i in 0..12 {
                platforms.push(platform(
                    50.0 + (i % 4) as f32 * 220.0,
                    450.0 - (i / 4) as f32 * 80.0,
                    60.0,
                ));
            }
        }
        // Floating islands, unconstrained
        1 => {
            for _ in 0..15 {
                platforms.push(Rect::new(
                    50.0 + rng.random::<f32>() * 800.0,
                    200.0 + rng.random::<f32>() * 250.0,
                    40.0 + rng.random::<f32>() * 40.0,
                    15.0,
                ));
            }
        }
        // Narrow stepped path
        2 => {
            for i in 0..20 {
                platforms.push(Rect::new(
                    50.0 + i as f32 * 40.0,
                    450.0 - (i % 3) as f32 * 50.0,
                    35.0,
                    15.0,
                ));
            }
        }
        // Vertical climb
        3 => {
            for i in 0..10 {
                platforms.push(Rect::new(
                    100.0 + (i % 3) as f32 * 300.0,
                    450.0 - i as f32 * 60.0,
                    80.0,
                    15.0,
                ));
            }
        }
        // Moving only: nothing static beyond the ground
        4 => {}
        // Minimalist staircase
        _ => {
            platforms.extend([
                platform(100.0, 450.0, 50.0),
                platform(200.0, 400.0, 40.0),
                platform(300.0, 350.0, 40.0),
                platform(400.0, 300.0, 40.0),
            ]);
        }
    }

    let mut hazards = Vec::new();
    let density = 8 + (n - 151) / 10;
    let width = 60.0 + (n % 5) as f32 * 10.0;
    for i in 0..density {
        let mut rect = platform(
            100.0 + ((i * 80) % 700) as f32,
            300.0 + ((i * 50) % 150) as f32,
            width,
        );
        let kind = match rng.random_range(0..6) {
            0 => HazardKind::spike(),
            1 => HazardKind::DisappearingPlatform,
            2 => HazardKind::collapsing(),
            3 => HazardKind::oscillating(
                rect.x,
                Some(rect.x - 150.0),
                Some(rect.x + 150.0),
                Some(3.0 + (n % 4) as f32),
            ),
            4 => HazardKind::InvisibleWall,
            _ => {
                rect.width = 150.0;
                rect.height = 80.0;
                HazardKind::ReverseControlZone
            }
        };
        hazards.push(HazardSpec::new(kind, rect));
    }

    if n >= 170 {
        for i in 0..2 {
            hazards.push(HazardSpec::new(
                HazardKind::ReverseControlZone,
                Rect::new(200.0 + i as f32 * 300.0, 250.0, 100.0, 100.0),
            ));
        }
    }

    // Door alternates side by parity and height by n mod 3
    let door = Rect::new(
        if n % 2 == 0 { 800.0 } else { 50.0 },
        if n % 3 == 0 { 370.0 } else { 200.0 },
        DOOR_SIZE,
        DOOR_SIZE,
    );

    let time_limit = 60 + ((n - 151) / 5) * 3;
    level(n, Tier::Expert, platforms, hazards, door, n >= 160, time_limit)
}

/// All levels of a run, generated once, with a cursor on the current one
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
    current: usize,
}

impl LevelCatalog {
    pub fn new(seed: u64) -> Self {
        Self::from_generator(&LevelGenerator::new(seed))
    }

    pub fn from_generator(generator: &LevelGenerator) -> Self {
        let levels: Vec<Level> = (1..=LEVEL_COUNT).map(|n| generator.generate(n)).collect();
        log::info!("Generated {} levels (seed {})", levels.len(), generator.seed());
        Self { levels, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Select the level at 0-based `index`, clamped into the catalogue
    pub fn load_level(&mut self, index: usize) -> &Level {
        self.current = index.min(self.levels.len().saturating_sub(1));
        &self.levels[self.current]
    }

    pub fn current(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn levels_in_tier(&self, tier: Tier) -> impl Iterator<Item = &Level> + '_ {
        self.levels.iter().filter(move |l| l.tier == tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen_level(n: u32) -> Level {
        LevelGenerator::new(42).generate(n)
    }

    fn spikes(level: &Level) -> usize {
        level.count_hazards(|k| matches!(k, HazardKind::Spike { .. }))
    }

    fn disappearing(level: &Level) -> usize {
        level.count_hazards(|k| *k == HazardKind::DisappearingPlatform)
    }

    fn collapsing(level: &Level) -> usize {
        level.count_hazards(|k| matches!(k, HazardKind::CollapsingPlatform { .. }))
    }

    fn oscillating(level: &Level) -> usize {
        level.count_hazards(|k| matches!(k, HazardKind::OscillatingPlatform { .. }))
    }

    fn reverse_zones(level: &Level) -> usize {
        level.count_hazards(|k| *k == HazardKind::ReverseControlZone)
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_level(1), Tier::Tutorial);
        assert_eq!(Tier::for_level(10), Tier::Tutorial);
        assert_eq!(Tier::for_level(11), Tier::Intermediate);
        assert_eq!(Tier::for_level(50), Tier::Intermediate);
        assert_eq!(Tier::for_level(51), Tier::Advanced);
        assert_eq!(Tier::for_level(150), Tier::Advanced);
        assert_eq!(Tier::for_level(151), Tier::Expert);
        assert_eq!(Tier::for_level(200), Tier::Expert);
    }

    #[test]
    fn test_every_level_starts_with_ground() {
        let generator = LevelGenerator::new(7);
        for n in 1..=LEVEL_COUNT {
            let level = generator.generate(n);
            assert_eq!(level.id, n);
            assert_eq!(level.platforms[0], ground());
            assert_eq!(level.tier, Tier::for_level(n));
        }
    }

    #[test]
    fn test_tutorial_platform_gates() {
        assert_eq!(gen_level(1).platforms.len(), 1);
        assert_eq!(gen_level(2).platforms.len(), 2);
        assert_eq!(gen_level(3).platforms.len(), 3);
        assert_eq!(gen_level(4).platforms.len(), 4);
        assert_eq!(gen_level(10).platforms.len(), 4);
    }

    #[test]
    fn test_tutorial_hazard_gates() {
        assert!(gen_level(4).hazards.is_empty());

        let five = gen_level(5);
        assert_eq!(spikes(&five), 1);
        assert_eq!(disappearing(&five), 0);
        assert_eq!(collapsing(&five), 0);

        assert_eq!(disappearing(&gen_level(6)), 0);
        assert_eq!(disappearing(&gen_level(7)), 1);
        assert_eq!(collapsing(&gen_level(8)), 0);
        assert_eq!(collapsing(&gen_level(9)), 1);
        assert_eq!(gen_level(9).time_limit, Some(120));
    }

    #[test]
    fn test_tutorial_jitter_stays_bounded() {
        for seed in 0..20 {
            let level = LevelGenerator::new(seed).generate(10);
            let p = level.platforms[1];
            assert!((150.0..210.0).contains(&p.x));
            assert!((360.0..400.0).contains(&p.y));
            assert!((80.0..140.0).contains(&p.width));
            assert!((680.0..820.0).contains(&level.door.x));
            let spike = level.hazards[0].rect;
            assert_eq!(spike.y, GROUND_Y - 20.0);
        }
    }

    #[test]
    fn test_intermediate_scaling() {
        let eleven = gen_level(11);
        assert_eq!(eleven.platforms.len(), 5);
        assert_eq!(spikes(&eleven), 2);
        assert_eq!(eleven.hazards.len(), 2);
        assert_eq!(eleven.time_limit, Some(90));
        assert_eq!(eleven.door, FIXED_DOOR);

        assert_eq!(disappearing(&gen_level(14)), 0);
        assert_eq!(disappearing(&gen_level(15)), 1);
        assert_eq!(collapsing(&gen_level(19)), 0);
        assert_eq!(collapsing(&gen_level(20)), 1);
        assert_eq!(oscillating(&gen_level(29)), 0);

        let thirty = gen_level(30);
        assert_eq!(thirty.platforms.len(), 6);
        assert_eq!(spikes(&thirty), 3);
        assert_eq!(oscillating(&thirty), 1);
        assert_eq!(thirty.hazards.len(), 6);
        assert_eq!(thirty.time_limit, Some(90 + 3 * 10));
    }

    #[test]
    fn test_intermediate_reversal_gate() {
        assert!(!gen_level(39).reverse_controls);
        assert!(gen_level(40).reverse_controls);
    }

    #[test]
    fn test_advanced_patterns() {
        // n % 4: 0 spiral (8), 1 zigzag (10), 2 islands (6), 3 stairs (7)
        assert_eq!(gen_level(52).platforms.len(), 9);
        assert_eq!(gen_level(53).platforms.len(), 11);
        assert_eq!(gen_level(54).platforms.len(), 7);
        assert_eq!(gen_level(51).platforms.len(), 8);

        let stairs = gen_level(51);
        assert_eq!(stairs.platforms[1], platform(100.0, 450.0, 90.0));
        assert_eq!(stairs.platforms[7], platform(760.0, 210.0, 90.0));
    }

    #[test]
    fn test_advanced_hazards_cycle_kinds() {
        let level = gen_level(71);
        assert_eq!(level.hazards.len(), 5 + 1); // 4 + 20/20, plus invisible wall
        assert!(matches!(level.hazards[0].kind, HazardKind::Spike { .. }));
        assert_eq!(level.hazards[1].kind, HazardKind::DisappearingPlatform);
        assert!(matches!(level.hazards[2].kind, HazardKind::CollapsingPlatform { .. }));
        assert_eq!(
            level.hazards[3].kind,
            HazardKind::OscillatingPlatform {
                start_x: 550.0,
                end_x: 750.0,
                speed: 5.0
            }
        );
        assert!(matches!(level.hazards[4].kind, HazardKind::Spike { .. }));
        assert_eq!(level.hazards[5].kind, HazardKind::InvisibleWall);
    }

    #[test]
    fn test_advanced_gates() {
        let count = |n: u32, kind: HazardKind| gen_level(n).count_hazards(|k| *k == kind);
        assert_eq!(count(69, HazardKind::InvisibleWall), 0);
        assert_eq!(count(70, HazardKind::InvisibleWall), 1);
        assert_eq!(count(79, HazardKind::ReverseControlZone), 0);
        assert_eq!(count(80, HazardKind::ReverseControlZone), 1);
        assert!(!gen_level(89).reverse_controls);
        assert!(gen_level(90).reverse_controls);
        assert_eq!(gen_level(51).time_limit, Some(75));
        assert_eq!(gen_level(150).time_limit, Some(75 + 9 * 5));
    }

    #[test]
    fn test_expert_patterns() {
        // n % 6: 0 maze (12), 1 islands (15), 2 narrow (20), 3 climb (10), 4 none, 5 minimalist (4)
        assert_eq!(gen_level(156).platforms.len(), 13);
        assert_eq!(gen_level(157).platforms.len(), 16);
        assert_eq!(gen_level(158).platforms.len(), 21);
        assert_eq!(gen_level(159).platforms.len(), 11);
        assert_eq!(gen_level(154).platforms.len(), 1);
        assert_eq!(gen_level(155).platforms.len(), 5);
    }

    #[test]
    fn test_expert_density_and_zones() {
        let first = gen_level(151);
        assert_eq!(first.hazards.len(), 8);
        assert_eq!(first.time_limit, Some(60));
        assert!(!first.reverse_controls);

        let late = gen_level(170);
        assert_eq!(late.hazards.len(), 9 + 2);
        let tail = &late.hazards[9..];
        assert!(tail.iter().all(|h| h.kind == HazardKind::ReverseControlZone));
        assert_eq!(tail[0].rect, Rect::new(200.0, 250.0, 100.0, 100.0));
        assert_eq!(tail[1].rect, Rect::new(500.0, 250.0, 100.0, 100.0));
        assert!(reverse_zones(&late) >= 2);

        assert!(!gen_level(159).reverse_controls);
        assert!(gen_level(160).reverse_controls);
        assert_eq!(gen_level(200).time_limit, Some(60 + 9 * 3));
    }

    #[test]
    fn test_expert_door_alternates() {
        assert_eq!(gen_level(152).door, Rect::new(800.0, 200.0, 40.0, 40.0));
        assert_eq!(gen_level(153).door, Rect::new(50.0, 370.0, 40.0, 40.0));
        assert_eq!(gen_level(156).door, Rect::new(800.0, 370.0, 40.0, 40.0));
        assert_eq!(gen_level(155).door, Rect::new(50.0, 200.0, 40.0, 40.0));
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = LevelGenerator::new(1234);
        let b = LevelGenerator::new(1234);
        for n in [3, 9, 33, 77, 157, 188] {
            assert_eq!(a.generate(n), b.generate(n));
        }
    }

    #[test]
    fn test_counts_do_not_depend_on_seed() {
        let a = LevelGenerator::new(1);
        let b = LevelGenerator::new(2);
        for n in 1..=150 {
            let (la, lb) = (a.generate(n), b.generate(n));
            assert_eq!(la.platforms.len(), lb.platforms.len());
            let kinds = |l: &Level| l.hazards.iter().map(|h| h.kind.name()).collect::<Vec<_>>();
            assert_eq!(kinds(&la), kinds(&lb));
        }
    }

    #[test]
    fn test_catalog_clamps_index() {
        let mut catalog = LevelCatalog::new(5);
        assert_eq!(catalog.len(), 200);
        assert_eq!(catalog.load_level(0).id, 1);
        assert_eq!(catalog.load_level(10_000).id, 200);
        assert_eq!(catalog.current_index(), 199);
        assert_eq!(catalog.current().name, "Expert 200");
        assert_eq!(catalog.get(10).map(|l| l.name.as_str()), Some("Challenge 11"));
    }

    #[test]
    fn test_catalog_tiers() {
        let catalog = LevelCatalog::new(5);
        assert_eq!(catalog.levels_in_tier(Tier::Tutorial).count(), 10);
        assert_eq!(catalog.levels_in_tier(Tier::Intermediate).count(), 40);
        assert_eq!(catalog.levels_in_tier(Tier::Advanced).count(), 100);
        assert_eq!(catalog.levels_in_tier(Tier::Expert).count(), 50);
        assert_eq!(Tier::Expert.levels(), 151..=200);
    }
}
