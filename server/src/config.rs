use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use error_stack::Report;
use time::Duration;
use vodca::References;

use kernel::prelude::policy::ReturnAlertConfig;
use kernel::KernelError;

/// Runtime settings read from the environment. A `.env` file is honoured.
#[derive(Debug, Clone, References)]
pub struct AppConfig {
    port: u16,
    return_alert: ReturnAlertConfig,
    portal_token_ttl: Duration,
}

impl AppConfig {
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let port = setting("SERVER_PORT", 8080u16)?;
        let scan_interval = positive(
            "RETURN_ALERT_INTERVAL_SECS",
            setting("RETURN_ALERT_INTERVAL_SECS", 60u64)?,
        )?;
        let lookahead = positive(
            "RETURN_ALERT_LOOKAHEAD_MINUTES",
            setting("RETURN_ALERT_LOOKAHEAD_MINUTES", 60i64)?,
        )?;
        let portal_token_ttl = positive(
            "PORTAL_TOKEN_TTL_HOURS",
            setting("PORTAL_TOKEN_TTL_HOURS", 72i64)?,
        )?;
        Ok(Self {
            port,
            return_alert: ReturnAlertConfig::new(
                StdDuration::from_secs(scan_interval),
                Duration::minutes(lookahead),
            ),
            portal_token_ttl: Duration::hours(portal_token_ttl),
        })
    }
}

fn setting<T>(key: &str, default: T) -> error_stack::Result<T, KernelError>
where
    T: FromStr,
    T::Err: Display,
{
    match dotenvy::var(key) {
        Ok(raw) => parse(key, Some(raw), default),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => parse(key, None, default),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Failed to read {key}"))),
    }
}

fn parse<T>(key: &str, raw: Option<String>, default: T) -> error_stack::Result<T, KernelError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw.trim().parse::<T>().map_err(|error| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Invalid value {raw:?} for {key}: {error}"))
        }),
        None => Ok(default),
    }
}

fn positive<T>(key: &str, value: T) -> error_stack::Result<T, KernelError>
where
    T: PartialOrd + Default + Display,
{
    if value <= T::default() {
        return Err(Report::new(KernelError::Internal)
            .attach_printable(format!("{key} must be greater than zero, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use super::{parse, positive};

    #[test]
    fn missing_setting_falls_back_to_default() {
        assert_eq!(parse("SERVER_PORT", None, 8080u16).unwrap(), 8080);
        assert_eq!(parse("SERVER_PORT", Some(" 3000 ".into()), 8080u16).unwrap(), 3000);
    }

    #[test]
    fn malformed_setting_is_rejected() {
        let report = parse("PORTAL_TOKEN_TTL_HOURS", Some("three days".into()), 72i64).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Internal));
    }

    #[test]
    fn zero_or_negative_durations_are_rejected() {
        let report = positive("RETURN_ALERT_INTERVAL_SECS", 0u64).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Internal));
        let report = positive("RETURN_ALERT_LOOKAHEAD_MINUTES", -5i64).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Internal));
        assert_eq!(positive("PORTAL_TOKEN_TTL_HOURS", 72i64).unwrap(), 72);
    }
}
