use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;

use hook_registry::hooks::{CallbackError, HookId, HookRegistry};
use hook_registry::{logging, RegistryConfig};

const ON_REQUEST: HookId = 1;
const ON_RESPONSE: HookId = 2;
const ON_SHUTDOWN: HookId = 3;

/// Number of concurrent tasks firing hooks
const DEMO_TASKS: u64 = 1_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RegistryConfig::from_env()?;

    // Initialize logging system
    let _guard = logging::init_logging(&config.logging)?;

    tracing::info!("=== Hook Registry Demo Starting (order: {}) ===", config.order);

    let registry: Arc<HookRegistry<Vec<u64>>> = Arc::new(HookRegistry::with_config(&config));
    let fired = Arc::new(AtomicU64::new(0));
    let failed = Arc::new(AtomicU64::new(0));

    let counter = Arc::clone(&fired);
    let request_id = registry.add(ON_REQUEST, move |args| {
        counter.fetch_add(args.len() as u64, Ordering::Relaxed);
        Ok(())
    });

    let counter = Arc::clone(&fired);
    registry.add(ON_RESPONSE, move |args| {
        counter.fetch_add(args.len() as u64, Ordering::Relaxed);
        Ok(())
    });

    // The registry drops callback errors, so this callback counts its own
    let failures = Arc::clone(&failed);
    registry.add(ON_RESPONSE, move |args| {
        if args.iter().any(|n| n % 7 == 0) {
            failures.fetch_add(1, Ordering::Relaxed);
            return Err(CallbackError::failed("multiple of seven"));
        }
        Ok(())
    });

    registry.add(ON_SHUTDOWN, |_| {
        tracing::info!("Shutdown hook fired");
        Ok(())
    });

    tracing::info!("Active hooks: {:?}", registry.hook_ids());

    let handles = (0..DEMO_TASKS).map(|i| {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let hook = if i % 2 == 0 { ON_REQUEST } else { ON_RESPONSE };
            registry.exec_with(hook, || vec![i]);
        })
    });
    for result in join_all(handles).await {
        result?;
    }

    tracing::info!(
        "Fired {} callback argument(s), {} reported failure(s)",
        fired.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed)
    );

    registry.remove(ON_REQUEST, request_id);
    registry.suspend(ON_RESPONSE);

    let before = fired.load(Ordering::Relaxed);
    registry.exec(ON_REQUEST, &vec![1]);
    registry.exec(ON_RESPONSE, &vec![2]);
    tracing::info!(
        "After remove/suspend: active {:?}, {} new argument(s) counted",
        registry.hook_ids(),
        fired.load(Ordering::Relaxed) - before
    );

    registry.exec(ON_SHUTDOWN, &Vec::new());

    tracing::info!("=== Hook Registry Demo Shutting Down ===");

    Ok(())
}
