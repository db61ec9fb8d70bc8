mod context;
mod flags;
mod parse;
mod prompts;

pub use context::{Context, Done};
pub use flags::CliFlags;
pub use parse::{ParseError, parse};

/// Run one CLI command. Returns the process exit code.
pub fn run(args: &[String]) -> i32 {
    let mut ctx = match Context::new(args) {
        Ok(ctx) => ctx,
        Err(e) => {
            prompts::error(&e.to_string());
            prompts::usage_hint();
            return 2;
        }
    };
    match ctx.run() {
        Ok(()) => 0,
        Err(Done(code)) => code,
    }
}
