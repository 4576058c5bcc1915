//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatlens::cli::{Args, init_tracing};
use chatlens::core::Analyzer;
use chatlens::format::write_report;
use chatlens::parser::{Parser, WhatsAppParser};
use chatlens::report::Report;
use chatlens::stopwords::StopWords;
use chatlens::ChatlensError;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose)?;

    let (format, output_path) = args.output_target()?;

    // Print header
    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if !args.list_users {
        println!("💾 Output:  {}", output_path.display());
        println!("📄 Format:  {}", format);
    }
    if let Some(ref user) = args.user {
        println!("👤 User:    {}", user);
    }
    if let Some(ref from) = args.from {
        println!("📅 From:    {}", from);
    }
    if let Some(ref to) = args.to {
        println!("📅 To:      {}", to);
    }
    println!();

    // Step 1: Parse
    let parser = WhatsAppParser::with_config(args.parser_config());
    println!("⏳ Parsing {}...", parser.name());
    let parse_start = Instant::now();
    let corpus = parser.parse(&args.input)?;
    println!(
        "   Found {} messages from {} users ({:.2}s)",
        corpus.len(),
        corpus.users().len(),
        parse_start.elapsed().as_secs_f64()
    );
    if corpus.untimed_count() > 0 {
        println!("   ⚠️  {} messages have unreadable timestamps", corpus.untimed_count());
    }

    if args.list_users {
        println!();
        println!("👥 Users:");
        for option in corpus.user_options() {
            println!("   {}", option);
        }
        return Ok(());
    }

    // Step 2: Analyze
    let stop_words = match args.stop_words {
        Some(ref path) => StopWords::load(path)?,
        None => StopWords::builtin(),
    };
    let analyzer = Analyzer::new().with_stop_words(stop_words);
    let criteria = args.criteria(&corpus)?;

    println!("📊 Analyzing...");
    let analyze_start = Instant::now();
    let report = Report::build(&analyzer, &corpus, &criteria, &args.exclude)?;
    println!("   Done in {:.2}s", analyze_start.elapsed().as_secs_f64());

    if report.is_empty {
        println!("   ⚠️  No messages match the selected filters");
    }

    // Step 3: Write
    println!("💾 Writing {}...", format);
    let written = write_report(&report, &output_path, format)?;

    println!();
    println!("✅ Done! Report saved to {}", output_path.display());
    if written.len() > 1 {
        println!("   {} tables written", written.len());
    }

    // Summary
    println!();
    println!("📈 Summary ({}):", report.user);
    println!("   Messages:  {}", report.stats.messages);
    println!("   Words:     {}", report.stats.words);
    println!("   Media:     {}", report.stats.media);
    println!("   Links:     {}", report.stats.links);
    if let Some(day) = report.insights.most_active_day {
        println!("   Busiest:   {}", day);
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
