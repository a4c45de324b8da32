/// D3D11 debug layer - drains the info queue with colored output
///
/// With the debug layer active the runtime stores validation messages in an
/// `ID3D11InfoQueue`. The device drains it after object creation and the
/// swap chain after every present; messages are printed to stderr and counted.

use colored::*;
use std::sync::atomic::{AtomicU32, Ordering};
use windows::Win32::Graphics::Direct3D11::{
    ID3D11InfoQueue, D3D11_MESSAGE, D3D11_MESSAGE_SEVERITY, D3D11_MESSAGE_SEVERITY_CORRUPTION,
    D3D11_MESSAGE_SEVERITY_ERROR, D3D11_MESSAGE_SEVERITY_INFO, D3D11_MESSAGE_SEVERITY_WARNING,
};

/// Counts of debug-layer messages seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationStats {
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
}

impl ValidationStats {
    pub fn total(&self) -> u32 {
        self.errors + self.warnings + self.info
    }
}

/// Process-wide counters (one device per process)
struct ValidationStatsTracker {
    errors: AtomicU32,
    warnings: AtomicU32,
    info: AtomicU32,
}

impl ValidationStatsTracker {
    const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
            info: AtomicU32::new(0),
        }
    }

    fn record(&self, severity: D3D11_MESSAGE_SEVERITY) {
        let counter = match severity {
            D3D11_MESSAGE_SEVERITY_CORRUPTION | D3D11_MESSAGE_SEVERITY_ERROR => &self.errors,
            D3D11_MESSAGE_SEVERITY_WARNING => &self.warnings,
            _ => &self.info,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get(&self) -> ValidationStats {
        ValidationStats {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            info: self.info.load(Ordering::Relaxed),
        }
    }
}

static VALIDATION_STATS: ValidationStatsTracker = ValidationStatsTracker::new();

/// Current debug-layer message counts
pub fn validation_stats() -> ValidationStats {
    VALIDATION_STATS.get()
}

/// Print a colored summary of the message counts
pub fn print_validation_stats_report() {
    let stats = validation_stats();
    eprintln!("{}", "[D3D11] Debug layer report".bright_blue().bold());
    eprintln!("  ├─ {}: {}", "Errors".red().bold(), stats.errors);
    eprintln!("  ├─ {}: {}", "Warnings".yellow().bold(), stats.warnings);
    eprintln!("  └─ {}: {}", "Info".cyan(), stats.info);
}

/// Print and clear every stored message
pub(crate) fn drain_info_queue(queue: &ID3D11InfoQueue) {
    unsafe {
        let count = queue.GetNumStoredMessages();
        for index in 0..count {
            let mut length = 0usize;
            if queue.GetMessage(index, None, &mut length).is_err() || length == 0 {
                continue;
            }

            // D3D11_MESSAGE is followed by its description bytes
            let mut storage = vec![0u64; length.div_ceil(std::mem::size_of::<u64>())];
            let message = storage.as_mut_ptr() as *mut D3D11_MESSAGE;
            if queue.GetMessage(index, Some(message), &mut length).is_err() {
                continue;
            }

            let message = &*message;
            let text = if message.pDescription.is_null() {
                String::from("No message")
            } else {
                let bytes = std::slice::from_raw_parts(
                    message.pDescription,
                    message.DescriptionByteLength,
                );
                String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string()
            };

            VALIDATION_STATS.record(message.Severity);
            print_message(message.Severity, message.ID.0, &text);
        }
        queue.ClearStoredMessages();
    }
}

fn print_message(severity: D3D11_MESSAGE_SEVERITY, id: i32, text: &str) {
    let severity_colored = match severity {
        D3D11_MESSAGE_SEVERITY_CORRUPTION => "CORRUPTION".red().bold(),
        D3D11_MESSAGE_SEVERITY_ERROR => "ERROR".red().bold(),
        D3D11_MESSAGE_SEVERITY_WARNING => "WARNING".yellow().bold(),
        D3D11_MESSAGE_SEVERITY_INFO => "INFO".cyan(),
        _ => "MESSAGE".bright_black(),
    };

    eprint!(
        "{} {}\n  ├─ {}: {}\n  └─ {}\n",
        "[D3D11".bright_blue().bold(),
        format!("{}]", severity_colored).bright_blue().bold(),
        "Message ID".bright_black(),
        id.to_string().white(),
        text.white()
    );
}
