use std::process::ExitCode;

use clap::Parser;

use toysh::{
	alias::DEFAULT_ALIAS_CAPACITY,
	config::{Settings, DEFAULT_CONFIG_PATH},
	history::DEFAULT_HISTORY_CAPACITY,
	prelude::*,
	prompt::{LineReader, Prompt},
};

#[derive(Parser, Debug)]
#[command(name = "toysh", version, about)]
struct Args {
	/// File holding the prompt name and delimiter
	#[arg(long, default_value = DEFAULT_CONFIG_PATH)]
	config: PathBuf,

	/// How many aliases to keep before the oldest is dropped
	#[arg(long, default_value_t = DEFAULT_ALIAS_CAPACITY as u16, value_parser = clap::value_parser!(u16).range(1..))]
	alias_capacity: u16,

	/// How many command lines `history` remembers
	#[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY as u16, value_parser = clap::value_parser!(u16).range(1..))]
	history_capacity: u16,

	/// Run this script, then exit
	script: Option<PathBuf>,
}

/// Drive the session until it exits. In `strict` mode the first failed line ends
/// the run with that error's code.
fn run(shell: &mut Shell, reader: &mut dyn LineReader, strict: bool) -> ExitCode {
	loop {
		match shell.run_cycle(reader) {
			Ok(Flow::Exit) => return ExitCode::SUCCESS,
			Ok(Flow::Continue | Flow::EndCycle) => {}
			Err(e) if e.is_fatal() => {
				error!("{e}");
				println!("Uncaught exception {}\nQuitting", e.code());
				return ExitCode::from(e.code() as u8)
			}
			Err(e) => {
				println!("{e}");
				if strict {
					return ExitCode::from(e.code() as u8)
				}
			}
		}
	}
}

fn main() -> ExitCode {
	env_logger::init();
	let args = Args::parse();
	debug!("{args:?}");

	let settings = Settings::load(&args.config);
	let mut shell = Shell::new(settings, args.alias_capacity.into(), args.history_capacity.into());

	match args.script {
		Some(script) => {
			if let Err(e) = shell.scripts_mut().push(&script) {
				println!("{e}");
				return ExitCode::from(e.code() as u8)
			}
			let mut no_input: VecDeque<String> = VecDeque::new();
			run(&mut shell, &mut no_input, true)
		}
		None => {
			let mut prompt = match Prompt::new(usize::from(args.history_capacity)) {
				Ok(prompt) => prompt,
				Err(e) => {
					eprintln!("Failed to initialize line editor: {e}");
					return ExitCode::FAILURE
				}
			};
			run(&mut shell, &mut prompt, false)
		}
	}
}
