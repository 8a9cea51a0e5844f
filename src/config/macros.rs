//! Configuration macros for zero-repetition config definitions
//!
//! `config_struct!` defines a configuration structure with embedded
//! defaults in a single declaration.

/// Define a configuration struct with embedded defaults
///
/// For every field this declares the name, the type and the default value
/// in one place, and generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde serialization/deserialization with `#[serde(default)]`, so a
///   partial TOML section only overrides the keys it names
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct DefiLlamaConfig {
///         pools_url: String = "https://yields.llama.fi/pools".to_string(),
///         timeout_secs: u64 = 30,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
