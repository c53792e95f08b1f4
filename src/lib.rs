pub mod geo;
pub mod progress;
pub mod route_plan;
pub mod session;
pub mod stats;
pub mod terminals;

#[cfg(target_os = "android")]
pub mod android_jni;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
