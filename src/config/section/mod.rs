//! Configuration section definitions.
//!
//! Each module corresponds to a section in `kiln.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `build`   | `[build]`    | Source/output dirs, source maps      |
//! | `scripts` | `[scripts]`  | Script entry, transpile target       |
//! | `serve`   | `[serve]`    | Development server                   |
//! | `styles`  | `[styles]`   | Stylesheet entry, browser targets    |

mod build;
mod scripts;
mod serve;
mod styles;

// Re-export section configs
pub use build::BuildConfig;
pub use scripts::ScriptsConfig;
pub use serve::ServeConfig;
pub use styles::StylesConfig;
