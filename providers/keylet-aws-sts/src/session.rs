use time::OffsetDateTime;

const DEFAULT_SESSION_SECS: u64 = 3600;
const MIN_SESSION_SECS: u64 = 900;
const MAX_SESSION_SECS: u64 = 43_200;

/// Parameters for one token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    /// Session label visible in provider audit logs.
    pub session_name: String,
    /// Requested lifetime, already clamped to the provider window.
    pub duration_secs: u64,
}

impl SessionSpec {
    pub fn for_request(scope: &str, ttl_secs: Option<u64>, issued_at: OffsetDateTime) -> Self {
        Self {
            session_name: session_name(scope, issued_at),
            duration_secs: session_duration_secs(ttl_secs),
        }
    }
}

/// Clamp a requested lifetime to what STS allows, [15 min, 12 h]. Absent or
/// zero requests take the one hour default. Clamping is silent, never a
/// rejection.
fn session_duration_secs(requested: Option<u64>) -> u64 {
    match requested {
        None | Some(0) => DEFAULT_SESSION_SECS,
        Some(secs) => secs.clamp(MIN_SESSION_SECS, MAX_SESSION_SECS),
    }
}

/// Session label embedding the requested scope and the issue instant;
/// shows up in provider audit trails.
fn session_name(scope: &str, issued_at: OffsetDateTime) -> String {
    format!("keylet-{scope}-{}", issued_at.unix_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_follows_the_clamp_table() {
        let cases = [
            (None, 3600),
            (Some(0), 3600),
            (Some(1), 900),
            (Some(899), 900),
            (Some(900), 900),
            (Some(901), 901),
            (Some(3600), 3600),
            (Some(43_199), 43_199),
            (Some(43_200), 43_200),
            (Some(43_201), 43_200),
            (Some(u64::MAX), 43_200),
        ];
        for (requested, expected) in cases {
            assert_eq!(
                session_duration_secs(requested),
                expected,
                "requested {requested:?}"
            );
        }
    }

    #[test]
    fn session_name_embeds_scope_and_timestamp() {
        let issued_at = OffsetDateTime::from_unix_timestamp(1_767_323_045).unwrap();
        assert_eq!(
            session_name("aws:s3", issued_at),
            "keylet-aws:s3-1767323045"
        );
        assert_eq!(session_name("aws", issued_at), "keylet-aws-1767323045");
    }

    #[test]
    fn specs_for_distinct_scopes_differ_even_in_the_same_second() {
        let issued_at = OffsetDateTime::from_unix_timestamp(1_767_323_045).unwrap();
        let a = SessionSpec::for_request("aws:s3", None, issued_at);
        let b = SessionSpec::for_request("aws:ecr", None, issued_at);
        assert_ne!(a.session_name, b.session_name);
        assert_eq!(a.duration_secs, b.duration_secs);
    }
}
