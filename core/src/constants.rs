// Env values used by Config::from_env
pub const KVSIGN_SECRET_KEY: &str = "KVSIGN_SECRET_KEY";
pub const KVSIGN_IGNORE_KEYS: &str = "KVSIGN_IGNORE_KEYS";
pub const KVSIGN_SKIP_EMPTY: &str = "KVSIGN_SKIP_EMPTY";
pub const KVSIGN_TAG: &str = "KVSIGN_TAG";
pub const KVSIGN_SEPARATOR: &str = "KVSIGN_SEPARATOR";
pub const KVSIGN_HASH: &str = "KVSIGN_HASH";
pub const KVSIGN_HASH_UPPERCASE: &str = "KVSIGN_HASH_UPPERCASE";

// Defaults
pub const DEFAULT_IGNORE_KEY: &str = "sign";
pub const DEFAULT_SEPARATOR: &str = "&";
pub const DEFAULT_KEY_LABEL: &str = "key";
