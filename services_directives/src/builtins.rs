//! Built-in directives
//!
//! Each built-in is registered as an ordinary entry so any of them can be
//! replaced or removed through [`DirectiveRegistry::register`].

use crate::context::DirectiveContext;
use crate::registry::{DirectiveDescriptor, DirectiveRegistry};
use services_history::HISTORY_HEADER;

pub const CLEAR_OUTPUT: &str = "clear-output";
pub const PRINT_HISTORY: &str = "print-history";
pub const CLEAR_HISTORY: &str = "clear-history";
pub const QUIT: &str = "quit";
pub const HELP: &str = "help";

/// Header emitted above the directive listing
pub const HELP_HEADER: &str = "DIRECTIVES:";

pub(crate) fn register_builtins(registry: &mut DirectiveRegistry) {
    let builtins: [(DirectiveDescriptor, fn(&[String], &mut DirectiveContext<'_>)); 5] = [
        (
            DirectiveDescriptor::new(CLEAR_OUTPUT, "Erase the output pane"),
            clear_output,
        ),
        (
            DirectiveDescriptor::new(PRINT_HISTORY, "Show every submitted line")
                .without_history(),
            print_history,
        ),
        (
            DirectiveDescriptor::new(CLEAR_HISTORY, "Forget every submitted line"),
            clear_history,
        ),
        (DirectiveDescriptor::new(QUIT, "Leave the console"), quit),
        (DirectiveDescriptor::new(HELP, "List local directives"), help),
    ];

    for (descriptor, handler) in builtins {
        // Built-in names are static and valid.
        let _ = registry.register(descriptor, Box::new(handler));
    }
}

fn clear_output(_args: &[String], ctx: &mut DirectiveContext<'_>) {
    ctx.clear_output();
}

fn print_history(_args: &[String], ctx: &mut DirectiveContext<'_>) {
    ctx.append(HISTORY_HEADER);
    let rendered = ctx.history().render();
    for line in rendered {
        ctx.append(line);
    }
}

fn clear_history(_args: &[String], ctx: &mut DirectiveContext<'_>) {
    ctx.history_mut().clear();
}

fn quit(_args: &[String], ctx: &mut DirectiveContext<'_>) {
    ctx.request_quit();
}

fn help(_args: &[String], ctx: &mut DirectiveContext<'_>) {
    let listing: Vec<String> = ctx
        .directives()
        .iter()
        .map(|d| format!("  {:<16}{}", d.name, d.description))
        .collect();

    ctx.append(HELP_HEADER);
    for line in listing {
        ctx.append(line);
    }
}
