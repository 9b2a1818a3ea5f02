use crate::settings::{DUMP_OCTETS_PER_GROUP, DUMP_OCTETS_PER_LINE};
use saying::say;
use std::fmt::Write;

/// Formats `bytes` like `xxd`, one line per 16 bytes.
///
/// Addresses start at `display_offset`. Bytes past the end of the final line are padded
/// with spaces so the character column stays aligned. `desc` is appended to the last line only.
pub fn dump_memory(bytes: &[u8], display_offset: usize, print_chars: bool, desc: Option<&str>) -> String {
    let mut output = String::new();
    let line_count = bytes.len().div_ceil(DUMP_OCTETS_PER_LINE);

    for (line_number, line) in bytes.chunks(DUMP_OCTETS_PER_LINE).enumerate() {
        // Addresses wrap past the top of the address space instead of overflowing
        let address = display_offset.wrapping_add(line_number * DUMP_OCTETS_PER_LINE);

        // Writing to a String can't fail
        let _ = write!(output, "{address:07x}: ");

        for group_start in (0..DUMP_OCTETS_PER_LINE).step_by(DUMP_OCTETS_PER_GROUP) {
            for position in group_start..group_start + DUMP_OCTETS_PER_GROUP {
                match line.get(position) {
                    Some(byte) => {
                        let _ = write!(output, "{byte:02x}");
                    }
                    None => output.push_str("  "),
                }
            }
            output.push(' ');
        }
        output.push(' ');

        if print_chars {
            output.extend(line.iter().map(|&byte| {
                if byte.is_ascii_graphic() || byte == b' ' {
                    byte as char
                } else {
                    '.'
                }
            }));
        }

        if line_number + 1 == line_count
            && let Some(desc) = desc
        {
            let _ = write!(output, "  ; {desc}");
        }

        output.push('\n');
    }

    output
}

/// Prints a memory dump, one `say!` per line
pub fn print_memory(bytes: &[u8], display_offset: usize, print_chars: bool, desc: Option<&str>) {
    let dump = dump_memory(bytes, display_offset, print_chars, desc);
    for line in dump.lines() {
        say!(line);
    }
}
