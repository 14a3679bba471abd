// Pool and draw constants
pub const POOL_CAPACITY: usize = 9;
pub const BATCH_DRAW_COUNT: usize = 10;
pub const COINS_PER_DRAW: u64 = 10;
pub const STARTING_COINS: u64 = 1000;

// Default machine tuning
pub const DEFAULT_PITY_THRESHOLD: i64 = 50;
pub const DEFAULT_VOLUME: f64 = 0.5;
pub const PITY_BOOST_AMOUNT: u32 = 5;

// Spin animation constants
pub const LOOP_COUNT: usize = 3;
pub const INITIAL_STEP_MS: u64 = 50;
pub const DECEL_WINDOW: u32 = 15;
pub const DECEL_FACTOR: f64 = 1.15;
pub const BATCH_STEP_BUDGET: u32 = 20;
pub const BATCH_STEP_MS: u64 = 30;
pub const BATCH_REST_SLOT: usize = 4;

// Save system constants
pub const MACHINE_FILE_MAGIC: u64 = 0x4C55434B44525000; // "LUCKDRP\0" in hex
pub const PROFILE_VERSION: u32 = 1;
