use std::time::Duration;

use clap::Args;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use log::debug;

use liuren_core::{
    CommandConfig, CommandInterpreter, Divination, InterpretConfig, Interpreter, Reading,
    RuleInterpreter, Sentiment, compute_chain, divine,
};

use super::{painted, resolve_moment};

#[derive(Args)]
pub struct CastArgs {
    /// Local date/time, e.g. 2024-03-05T14:00 (default: now)
    #[arg(short, long)]
    at: Option<String>,

    /// External interpreter program; reads the prompt on stdin, prints JSON
    #[arg(short, long)]
    exec: Option<String>,

    /// Argument passed to the external interpreter (repeatable)
    #[arg(long = "arg", allow_hyphen_values = true)]
    exec_args: Vec<String>,

    /// Seconds to wait for the external interpreter before giving up
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Stage weights for the built-in interpreter as MONTH,DAY,HOUR, each 1-9
    /// [default: 1,2,3]
    #[arg(short, long, value_delimiter = ',', conflicts_with = "exec")]
    weights: Option<Vec<u32>>,

    /// Only compute the chain, skip interpretation
    #[arg(long)]
    no_interpret: bool,

    /// Print JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

pub fn run(args: &CastArgs) -> Result<(), String> {
    let moment = resolve_moment(args.at.as_deref())?;

    if args.no_interpret {
        let reading = compute_chain(moment);
        if args.json {
            let json = serde_json::to_string_pretty(&reading).map_err(|e| e.to_string())?;
            println!("{json}");
        } else {
            print_reading(&reading);
        }
        return Ok(());
    }

    let interpreter = build_interpreter(args)?;
    debug!("using interpreter `{}`", interpreter.name());
    let divination = divine(moment, &interpreter);

    if args.json {
        let json = serde_json::to_string_pretty(&divination).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print_reading(&divination.reading);
        print_analysis(&divination);
    }
    Ok(())
}

fn build_interpreter(args: &CastArgs) -> Result<Box<dyn Interpreter>, String> {
    if let Some(program) = &args.exec {
        let config = CommandConfig::new(program)
            .with_args(args.exec_args.iter().cloned())
            .with_timeout(Duration::from_secs(args.timeout));
        return Ok(Box::new(CommandInterpreter::new(config)));
    }
    let config = match args.weights.as_deref() {
        None => InterpretConfig::default(),
        Some(&[month, day, hour]) => {
            if let Some(w) = [month, day, hour].into_iter().find(|w| !(1..=9).contains(w)) {
                return Err(format!("--weights values must be 1-9, got {w}"));
            }
            InterpretConfig::default().with_weights(month, day, hour)
        }
        Some(other) => {
            return Err(format!(
                "--weights takes three values (MONTH,DAY,HOUR), got {}",
                other.len()
            ));
        }
    };
    Ok(Box::new(RuleInterpreter::new(config)))
}

fn print_reading(reading: &Reading) {
    let result = reading.result();
    println!(
        "  {} {}",
        "Reading for".bold(),
        reading.moment().format("%Y-%m-%d %H:%M")
    );
    println!();
    println!(
        "  {} {}  ({})",
        painted(result).bold(),
        result.details().glyph,
        result.details().meaning
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Month (Root)", "Day (Trunk)", "Hour (Result)"]);
    table.add_row(
        reading
            .chain()
            .iter()
            .map(|st| format!("{st} {}", st.details().glyph))
            .collect::<Vec<_>>(),
    );
    println!("{table}");
    println!();
    println!("  Values: {}", reading.values_line().dimmed());
}

fn print_analysis(divination: &Divination) {
    let analysis = &divination.analysis;
    let sentiment = match analysis.sentiment {
        Sentiment::Bullish => analysis.sentiment.to_string().green(),
        Sentiment::Bearish => analysis.sentiment.to_string().red(),
        Sentiment::Volatile => analysis.sentiment.to_string().yellow(),
        Sentiment::Neutral => analysis.sentiment.to_string().normal(),
    };

    println!();
    println!(
        "  {} [{}]",
        "Analysis".bold(),
        divination.interpreter.dimmed()
    );
    if let Some(reason) = &divination.fallback_reason {
        println!("  {}", format!("interpreter unavailable: {reason}").yellow());
    }
    println!("  sentiment:   {sentiment} ({}%)", analysis.probability);
    println!("  explanation: {}", analysis.explanation);
    println!("  advice:      {}", analysis.advice);
}
