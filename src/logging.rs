//! Tracing subscriber setup
//!
//! `RUST_LOG` replaces the default directives when it is set.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "platformer=debug,gilrs=warn"
    } else {
        "platformer=info,gilrs=error"
    }
}

/// `RUST_LOG` when set and non-empty, the crate defaults otherwise
fn filter_from(env: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = match env.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => default_directives(),
    };
    Ok(EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(directives)?)
}

fn filter() -> anyhow::Result<EnvFilter> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(env.as_deref())
}

/// Install the global subscriber. Call once, early in `main`.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_timer(fmt::time::uptime()))
        .with(filter()?)
        .try_init()?;
    Ok(())
}

/// No clock on wasm, so no timestamps
#[cfg(target_arch = "wasm32")]
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time())
        .with(filter()?)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directives_win() {
        let f = filter_from(Some("platformer=warn")).unwrap().to_string();
        assert!(f.contains("platformer=warn"));
        assert!(!f.contains("platformer=debug"));
        assert!(!f.contains("platformer=info"));
    }

    #[test]
    fn test_defaults_when_unset_or_empty() {
        for env in [None, Some(""), Some("  ")] {
            let f = filter_from(env).unwrap().to_string();
            assert!(f.contains("gilrs="), "{}", f);
            assert!(f.contains("platformer="), "{}", f);
        }
    }

    #[test]
    fn test_bad_directive_is_an_error() {
        assert!(filter_from(Some("platformer=notalevel")).is_err());
    }
}
