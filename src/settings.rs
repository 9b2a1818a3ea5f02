use crate::compiler_frontend::binding_table::BindingTable;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::memory_dump::dump_memory;
use crate::return_config_error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "wasm_front.toml";

// Binding tables start empty and jump to this many slots on their first insert.
// Must stay a power of two, growth is always by doubling.
pub const INITIAL_BINDING_CAPACITY: usize = 8;

// Memory dump layout (mimics xxd)
pub const DUMP_OCTETS_PER_LINE: usize = 16;
pub const DUMP_OCTETS_PER_GROUP: usize = 2;

// Rough guesses for pre-allocating module views.
// Purely an optimisation, nothing breaks if these are wrong.
pub const MINIMUM_LIKELY_FUNCS: usize = 8;
pub const MINIMUM_LIKELY_EXPORTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Slot count a binding table jumps to on its first insert
    pub initial_binding_capacity: usize,

    /// Whether memory dumps render the printable-ASCII column
    pub dump_chars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_binding_capacity: INITIAL_BINDING_CAPACITY,
            dump_chars: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Config, CompilerError> {
        let config: Config = match toml::from_str(source) {
            Ok(config) => config,
            Err(e) => return_config_error!(format!("Could not parse config: {e}")),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config, CompilerError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => crate::return_file_error!(path, format!("Could not read config: {e}"), {
                CompilationStage => "Config Loading",
            }),
        };

        Config::from_toml_str(&source).map_err(|e| e.with_file_path(path.to_path_buf()))
    }

    /// An empty table that will allocate `initial_binding_capacity` slots on first insert.
    ///
    /// Opt-in only: tables built inside modules, funcs, type lists and tableswitches
    /// always start from `INITIAL_BINDING_CAPACITY`.
    pub fn new_binding_table(&self) -> BindingTable {
        BindingTable::with_initial_capacity(self.initial_binding_capacity)
    }

    pub fn dump_memory(&self, bytes: &[u8], display_offset: usize, desc: Option<&str>) -> String {
        dump_memory(bytes, display_offset, self.dump_chars, desc)
    }

    fn validate(&self) -> Result<(), CompilerError> {
        if self.initial_binding_capacity == 0 || !self.initial_binding_capacity.is_power_of_two() {
            return_config_error!(
                format!(
                    "initial_binding_capacity must be a non-zero power of two, found {}",
                    self.initial_binding_capacity
                ),
                {
                    ConfigKey => "initial_binding_capacity",
                    ExpectedValue => "8, 16, 32, ...",
                }
            );
        }

        Ok(())
    }
}
