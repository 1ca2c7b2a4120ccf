use rand::distributions::Alphanumeric;
use rand::Rng;
use time::{Duration, OffsetDateTime};
use vodca::References;

const TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone, Eq, PartialEq, Hash, References)]
pub struct PortalToken {
    value: String,
    expires_at: OffsetDateTime,
}

impl PortalToken {
    pub fn new(value: impl Into<String>, expires_at: OffsetDateTime) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn generate(now: OffsetDateTime, ttl: Duration) -> Self {
        let value = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect::<String>();
        Self::new(value, now + ttl)
    }

    pub fn is_expired(&self, now: &OffsetDateTime) -> bool {
        *now >= self.expires_at
    }

    pub fn accepts(&self, presented: &str, now: &OffsetDateTime) -> bool {
        self.value == presented && !self.is_expired(now)
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;

    use crate::entity::PortalToken;

    #[test]
    fn token_expires() {
        let now = datetime!(2024-05-01 10:00 UTC);
        let token = PortalToken::generate(now, Duration::hours(72));
        assert_eq!(token.value().len(), 32);
        assert!(token.accepts(token.value(), &now));
        assert!(!token.accepts("something-else", &now));
        assert!(!token.accepts(token.value(), &(now + Duration::hours(72))));
    }
}
