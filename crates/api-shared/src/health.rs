use crate::wire::HealthRes;

/// Simple health service that can be used by every CareChain surface
///
/// This service provides a standardised way to check the health status of the CareChain service.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Static health check
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "CareChain is alive".into(),
        }
    }
}
