//! JNI bindings for the Android app.
//!
//! Each public function here corresponds to an `external fun`
//! declaration in RustBridge.kt. The function names follow JNI naming
//! conventions: Java_<package>_<class>_<method> with dots replaced by
//! underscores. Structured data crosses the boundary as JSON strings.

use jni::objects::{JClass, JString};
use jni::sys::{jdouble, jstring};
use jni::JNIEnv;

use crate::stats::{self, RouteSummary};

/// Returns the core library version.
/// Maps to: RustBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_commutewise_app_RustBridge_version(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    let version = crate::VERSION;
    env.new_string(version)
        .expect("failed to create Java string")
        .into_raw()
}

/// Routes log output to logcat.
/// Maps to: RustBridge.initLogging()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_commutewise_app_RustBridge_initLogging(
    _env: JNIEnv,
    _class: JClass,
) {
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Debug),
    );
}

/// Resolves route progress for the given position and route polyline,
/// both JSON-encoded, and returns the split as JSON.
/// Maps to: RustBridge.resolveProgress(positionJson, routeJson) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_commutewise_app_RustBridge_resolveProgress(
    mut env: JNIEnv,
    _class: JClass,
    position: JString,
    route: JString,
) -> jstring {
    let position: String = env
        .get_string(&position)
        .expect("failed to read position string")
        .into();
    let route: String = env
        .get_string(&route)
        .expect("failed to read route string")
        .into();

    let json = crate::progress::resolve_to_json(&position, &route)
        .unwrap_or_else(|e| serde_json::json!({ "error": e }).to_string());

    env.new_string(json)
        .expect("failed to create Java string")
        .into_raw()
}

/// Projects remaining distance and time from a JSON-encoded route
/// summary and a progress ratio, returned as JSON.
/// Maps to: RustBridge.projectRemaining(summaryJson, ratio) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_commutewise_app_RustBridge_projectRemaining(
    mut env: JNIEnv,
    _class: JClass,
    summary: JString,
    ratio: jdouble,
) -> jstring {
    let summary: String = env
        .get_string(&summary)
        .expect("failed to read summary string")
        .into();

    let json = serde_json::from_str::<RouteSummary>(&summary)
        .map_err(|e| format!("summary decode error: {e}"))
        .and_then(|s| {
            serde_json::to_string(&stats::project_remaining(&s, ratio))
                .map_err(|e| format!("JSON serialize error: {e}"))
        })
        .unwrap_or_else(|e| serde_json::json!({ "error": e }).to_string());

    env.new_string(json)
        .expect("failed to create Java string")
        .into_raw()
}
