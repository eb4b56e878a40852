//! Checkout Script Loader
//!
//! Injects the hosted checkout script at most once per page.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::CheckoutConfig;
use crate::error::Result;

/// Page that scripts can be attached to
pub trait ScriptHost {
    /// Whether an element with `id` already exists
    fn has_script(&self, id: &str) -> bool;

    /// Append an async `<script id=.. src=..>`; load and error are only logged
    fn inject_script(&self, id: &str, src: &str) -> Result<()>;
}

/// Outcome of [`WidgetLoader::ensure_loaded`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptLoad {
    /// A script tag was appended by this call
    Injected,

    /// The script was already on the page, or a previous call handled it
    AlreadyPresent,

    /// Injection was attempted and failed; it will not be retried
    Failed,
}

/// Idempotent loader for the checkout script
#[derive(Debug, Default)]
pub struct WidgetLoader {
    requested: AtomicBool,
}

impl WidgetLoader {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Process-wide loader
    pub fn global() -> &'static Self {
        static LOADER: WidgetLoader = WidgetLoader::new();
        &LOADER
    }

    /// Whether a load has been attempted
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Make sure the checkout script is attached to `host`
    pub fn ensure_loaded(&self, host: &dyn ScriptHost, config: &CheckoutConfig) -> ScriptLoad {
        if self.requested.swap(true, Ordering::SeqCst) {
            return ScriptLoad::AlreadyPresent;
        }

        if host.has_script(&config.script_id) {
            tracing::debug!(id = %config.script_id, "Checkout script already present");
            return ScriptLoad::AlreadyPresent;
        }

        match host.inject_script(&config.script_id, &config.script_url) {
            Ok(()) => {
                tracing::info!(src = %config.script_url, "Injected checkout script");
                ScriptLoad::Injected
            }
            Err(e) => {
                tracing::error!(src = %config.script_url, "Failed to inject checkout script: {}", e);
                ScriptLoad::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakePage {
        scripts: Mutex<Vec<(String, String)>>,
        broken: bool,
    }

    impl ScriptHost for FakePage {
        fn has_script(&self, id: &str) -> bool {
            self.scripts.lock().unwrap().iter().any(|(i, _)| i == id)
        }

        fn inject_script(&self, id: &str, src: &str) -> Result<()> {
            if self.broken {
                return Err(CheckoutError::Widget("no document body".into()));
            }
            self.scripts.lock().unwrap().push((id.into(), src.into()));
            Ok(())
        }
    }

    #[test]
    fn test_injects_once() {
        let loader = WidgetLoader::new();
        let page = FakePage::default();
        let config = CheckoutConfig::default();

        assert_eq!(loader.ensure_loaded(&page, &config), ScriptLoad::Injected);
        assert_eq!(loader.ensure_loaded(&page, &config), ScriptLoad::AlreadyPresent);
        assert_eq!(loader.ensure_loaded(&page, &config), ScriptLoad::AlreadyPresent);

        let scripts = page.scripts.lock().unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].0, "razorpay-sdk");
        assert_eq!(scripts[0].1, "https://checkout.razorpay.com/v1/checkout.js");
    }

    #[test]
    fn test_existing_script_not_duplicated() {
        let loader = WidgetLoader::new();
        let page = FakePage::default();
        page.scripts
            .lock()
            .unwrap()
            .push(("razorpay-sdk".into(), "cached".into()));

        assert_eq!(
            loader.ensure_loaded(&page, &CheckoutConfig::default()),
            ScriptLoad::AlreadyPresent
        );
        assert_eq!(page.scripts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_failure_not_retried() {
        let loader = WidgetLoader::new();
        let page = FakePage {
            broken: true,
            ..Default::default()
        };
        let config = CheckoutConfig::default();

        assert_eq!(loader.ensure_loaded(&page, &config), ScriptLoad::Failed);
        assert!(loader.is_requested());
        assert_eq!(loader.ensure_loaded(&page, &config), ScriptLoad::AlreadyPresent);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(WidgetLoader::global(), WidgetLoader::global()));
    }
}
