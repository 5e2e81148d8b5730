use std::net::IpAddr;
use std::num::NonZeroU32;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;

/// Per-client-IP request throttle for a single route.
pub struct Throttle {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
}

impl Throttle {
    /// Allows `per_minute` requests per IP, replenished evenly over a minute.
    pub fn per_minute(per_minute: u32) -> Self {
        let burst = NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(burst)),
        }
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), AppError> {
        self.limiter.check_key(&ip).map_err(|_| {
            tracing::warn!(%ip, "request throttled");
            AppError::RateLimited(crate::messages::t("throttle"))
        })
    }

    /// Drops state for keys that are back to a full quota.
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventh_request_in_a_minute_is_rejected() {
        let throttle = Throttle::per_minute(6);
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        for _ in 0..6 {
            assert!(throttle.check(ip).is_ok());
        }
        assert!(matches!(throttle.check(ip), Err(AppError::RateLimited(_))));

        let other: IpAddr = "10.0.0.2".parse().unwrap();
        assert!(throttle.check(other).is_ok());
    }
}
