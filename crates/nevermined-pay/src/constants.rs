/// Environment variable holding the Nevermined API key. Absent means mock mode.
pub const ENV_API_KEY: &str = "NEVERMINED_API_KEY";

/// Environment variable naming the Nevermined environment.
pub const ENV_ENVIRONMENT: &str = "NEVERMINED_ENVIRONMENT";

/// Environment variable overriding the resolved environment's backend URL.
pub const ENV_BACKEND_URL: &str = "NEVERMINED_BACKEND_URL";

/// Environment variable bounding each backend call, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "NEVERMINED_TIMEOUT_SECS";

/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "testing";

/// Upper bound on a single backend payment call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend route that purchases access to a service.
pub const PAY_FOR_SERVICE_PATH: &str = "/api/v1/payments/service";

/// Agreement id reported when the backend confirms a payment without one.
pub const UNKNOWN_AGREEMENT_ID: &str = "unknown";

/// Byte length of a synthesized mock agreement id (hex-encoded, `0x`-prefixed).
pub const MOCK_AGREEMENT_ID_BYTES: usize = 32;
