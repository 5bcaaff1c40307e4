//! Derived key naming.
//!
//! An operation's qualified name is the root of its counter and history
//! keys; a cached resource is keyed by its resource key under fixed prefixes.

/// Suffix of the list holding rendered call arguments.
pub const INPUTS_SUFFIX: &str = ":inputs";
/// Suffix of the list holding rendered call results.
pub const OUTPUTS_SUFFIX: &str = ":outputs";
/// Prefix of cached resource values.
pub const CACHED_PREFIX: &str = "cached:";
/// Prefix of per-resource miss counters.
pub const COUNT_PREFIX: &str = "count:";

/// Key of the invocation counter: the name itself.
pub fn counter_key(name: &str) -> String {
    name.to_string()
}

/// Key of the argument history list.
pub fn inputs_key(name: &str) -> String {
    format!("{name}{INPUTS_SUFFIX}")
}

/// Key of the result history list.
pub fn outputs_key(name: &str) -> String {
    format!("{name}{OUTPUTS_SUFFIX}")
}

/// Key of the cached copy of a resource.
pub fn cached_key(resource: &str) -> String {
    format!("{CACHED_PREFIX}{resource}")
}

/// Key of the miss counter of a resource.
pub fn count_key(resource: &str) -> String {
    format!("{COUNT_PREFIX}{resource}")
}
