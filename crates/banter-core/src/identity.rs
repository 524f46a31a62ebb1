//! Random identity assignment for new connections.

use rand::Rng;

/// Base URL of the avatar image service.
const AVATAR_BASE_URL: &str = "https://avatar.iran.liara.run/public";

/// Avatar presentation styles the service can render.
const AVATAR_STYLES: [&str; 2] = ["girl", "boy"];

/// A freshly assigned username and avatar URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Display name in the form `User_NNNN`.
    pub username: String,
    /// Avatar image URL carrying the username as a query parameter.
    pub avatar: String,
}

impl Identity {
    /// Generate a random identity using the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generate a random identity from the given RNG.
    ///
    /// The username is `User_` plus a number drawn uniformly from
    /// `1000..=9999`. Collisions with names already in use are allowed
    /// and never resolved. The avatar style is a uniform pick between
    /// the two styles the service offers.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let username = format!("User_{}", rng.random_range(1000..=9999));
        let style = AVATAR_STYLES[rng.random_range(0..AVATAR_STYLES.len())];
        let avatar = format!("{AVATAR_BASE_URL}/{style}?username={username}");
        Self { username, avatar }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    #[test]
    fn username_matches_pattern() {
        let pattern = Regex::new(r"^User_\d{4}$").unwrap();
        for _ in 0..50 {
            let identity = Identity::generate();
            assert!(
                pattern.is_match(&identity.username),
                "bad username: {}",
                identity.username
            );
        }
    }

    #[test]
    fn username_number_in_range() {
        for _ in 0..50 {
            let identity = Identity::generate();
            let n: u32 = identity.username["User_".len()..].parse().unwrap();
            assert!((1000..=9999).contains(&n));
        }
    }

    #[test]
    fn avatar_embeds_username_as_query() {
        let identity = Identity::generate();
        assert!(identity
            .avatar
            .ends_with(&format!("?username={}", identity.username)));
    }

    #[test]
    fn avatar_uses_known_style() {
        for _ in 0..50 {
            let identity = Identity::generate();
            let known = AVATAR_STYLES
                .iter()
                .any(|style| identity.avatar.starts_with(&format!("{AVATAR_BASE_URL}/{style}?")));
            assert!(known, "bad avatar: {}", identity.avatar);
        }
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = Identity::generate_with(&mut StdRng::seed_from_u64(7));
        let b = Identity::generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn both_styles_eventually_appear() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_girl = false;
        let mut seen_boy = false;
        for _ in 0..200 {
            let identity = Identity::generate_with(&mut rng);
            seen_girl |= identity.avatar.contains("/girl?");
            seen_boy |= identity.avatar.contains("/boy?");
        }
        assert!(seen_girl && seen_boy);
    }
}
