use crate::compiler_frontend::compiler_errors::{
    CompilerError, ErrorMetaDataKey, ErrorType, error_type_to_str,
};
use saying::say;
use std::env;
use std::path::{Path, PathBuf};

fn normalize_display_path(path: &Path) -> PathBuf {
    let path_string = path.to_string_lossy();
    if let Some(stripped) = path_string.strip_prefix(r"\\?\") {
        return PathBuf::from(stripped);
    }

    path.to_path_buf()
}

fn relative_display_path(path: &Path) -> String {
    let normalized = normalize_display_path(path);

    match env::current_dir() {
        Ok(dir) => {
            let normalized_dir = normalize_display_path(&dir);
            normalized
                .strip_prefix(&normalized_dir)
                .unwrap_or(&normalized)
                .to_string_lossy()
                .to_string()
        }
        Err(_) => normalized.to_string_lossy().to_string(),
    }
}

pub fn print_errors(errors: Vec<CompilerError>) {
    for err in errors {
        print_formatted_error(err);
    }
}

pub fn print_formatted_error(e: CompilerError) {
    let relative_dir = match &e.file_path {
        Some(path) => relative_display_path(path),
        None => String::new(),
    };

    match e.error_type {
        ErrorType::Allocation => {
            say!(Red "\n(╯°□°)╯  ", error_type_to_str(&e.error_type));
            if let Some(&table) = e.metadata.get(&ErrorMetaDataKey::BindingTable) {
                say!(Dark Magenta "While growing ", Bright table);
            }
        }

        ErrorType::Config => {
            if !relative_dir.is_empty() {
                say!("\n (-_-)  🔥🔥🔥🔥 ", Dark Magenta relative_dir, " 🔥🔥🔥🔥  <(^~^)/ ");
            }
            say!(Yellow "CONFIG FILE ISSUE- ");
            if let Some(&key) = e.metadata.get(&ErrorMetaDataKey::ConfigKey) {
                say!(Dark Yellow "Key: ", Bright key);
            }
        }

        ErrorType::File => {
            say!(Yellow "🏚 Can't find/read file or directory: ", relative_dir);
            say!(e.msg);
            return;
        }

        ErrorType::Compiler => {
            say!(Yellow "COMPILER BUG - ");
            say!(Dark Yellow "wasm front-end developer skill issue (not your fault)");
        }
    }

    say!(Red e.msg);

    if let Some(&suggestion) = e.metadata.get(&ErrorMetaDataKey::PrimarySuggestion) {
        say!(Green "Suggestion: ", suggestion);
    }
}
