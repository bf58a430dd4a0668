use std::env;
use std::process;

use chrono::NaiveDate;
use hetu::{HetuGen, ParsedHetu, create_with_age_at, local_today, parse_hetu_at, validate_hetu};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
struct ParseOpts {
    today: Option<NaiveDate>,
    json: bool,
}

#[derive(Debug, Clone)]
struct CreateOpts {
    age: Option<u32>,
    count: usize,
    seed: Option<u64>,
    today: Option<NaiveDate>,
}

impl Default for CreateOpts {
    fn default() -> Self {
        Self {
            age: None,
            count: 1,
            seed: None,
            today: None,
        }
    }
}

/// Fallbacks for `--today` and `--seed`.
#[derive(Debug, Clone, Default)]
struct Defaults {
    today: Option<NaiveDate>,
    seed: Option<u64>,
}

impl Defaults {
    fn from_env() -> Result<Self, String> {
        let today = match env::var("HETU_TODAY") {
            Ok(raw) => Some(parse_date(&raw)?),
            Err(_) => None,
        };
        let seed = match env::var("HETU_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| "HETU_SEED must be an unsigned integer".to_string())?,
            ),
            Err(_) => None,
        };
        Ok(Self { today, seed })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hetu=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    eprintln!(
        "hetu - Finnish personal identity code tool\n\n\
Usage:\n  hetu validate <code>\n  hetu parse <code> [--today YYYY-MM-DD] [--json]\n  hetu create --age <n> [--count <n>] [--seed <u64>] [--today YYYY-MM-DD]\n  hetu selftest\n\n\
Environment:\n  HETU_TODAY=YYYY-MM-DD  reference date for ages (default: local date)\n  HETU_SEED=<u64>        seed for reproducible generation\n  RUST_LOG=<filter>      log filter (default: hetu=warn)\n"
    );
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("invalid date: {s}"))
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_parse_flags(args: &[String], defaults: &Defaults) -> Result<ParseOpts, String> {
    let mut opts = ParseOpts {
        today: defaults.today,
        json: false,
    };
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--today" => {
                opts.today = Some(parse_date(flag_value(args, i, "--today")?)?);
                i += 2;
            }
            "--json" => {
                opts.json = true;
                i += 1;
            }
            _ => return Err(format!("unknown flag: {}", args[i])),
        }
    }

    Ok(opts)
}

fn parse_create_flags(args: &[String], defaults: &Defaults) -> Result<CreateOpts, String> {
    let mut opts = CreateOpts {
        seed: defaults.seed,
        today: defaults.today,
        ..CreateOpts::default()
    };
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--age" => {
                opts.age = Some(
                    flag_value(args, i, "--age")?
                        .parse::<u32>()
                        .map_err(|_| "invalid integer for --age".to_string())?,
                );
                i += 2;
            }
            "--count" => {
                opts.count = flag_value(args, i, "--count")?
                    .parse::<usize>()
                    .map_err(|_| "invalid integer for --count".to_string())?;
                i += 2;
            }
            "--seed" => {
                opts.seed = Some(
                    flag_value(args, i, "--seed")?
                        .parse::<u64>()
                        .map_err(|_| "invalid integer for --seed".to_string())?,
                );
                i += 2;
            }
            "--today" => {
                opts.today = Some(parse_date(flag_value(args, i, "--today")?)?);
                i += 2;
            }
            _ => return Err(format!("unknown flag: {}", args[i])),
        }
    }

    if opts.age.is_none() {
        return Err("create requires --age".to_string());
    }
    Ok(opts)
}

fn run_validate(args: &[String]) -> Result<(), String> {
    let code = args.first().ok_or("validate requires a code")?;
    if args.len() > 1 {
        return Err(format!("unexpected argument: {}", args[1]));
    }

    let ok = validate_hetu(code);
    println!("{}", if ok { "true" } else { "false" });
    if ok {
        Ok(())
    } else {
        Err("invalid identity code".to_string())
    }
}

fn print_parsed(parsed: &ParsedHetu, json_out: bool) -> Result<(), String> {
    if json_out {
        let payload = json!({
            "raw": parsed.raw,
            "valid": parsed.valid,
            "sex": parsed.sex,
            "date_of_birth": parsed.date_of_birth.to_string(),
            "age_in_years": parsed.age_in_years,
            "century_sign": parsed.century_sign.to_string(),
            "individual_number": parsed.individual_number,
            "temporary": parsed.is_temporary(),
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!("raw={}", parsed.raw);
        println!("valid={}", parsed.valid);
        println!("sex={}", parsed.sex);
        println!("date_of_birth={}", parsed.date_of_birth);
        println!("age_in_years={}", parsed.age_in_years);
        println!("century_sign={}", parsed.century_sign);
        println!("individual_number={:03}", parsed.individual_number);
        println!("temporary={}", parsed.is_temporary());
    }
    Ok(())
}

fn run_parse(args: &[String], defaults: &Defaults) -> Result<(), String> {
    let code = args.first().ok_or("parse requires a code")?;

    let opts = parse_parse_flags(&args[1..], defaults)?;
    let today = opts.today.unwrap_or_else(local_today);

    let parsed = parse_hetu_at(code, today).map_err(|e| e.to_string())?;
    print_parsed(&parsed, opts.json)
}

fn run_create(args: &[String], defaults: &Defaults) -> Result<(), String> {
    let opts = parse_create_flags(args, defaults)?;
    let age = opts.age.ok_or("create requires --age")?;

    let codes = match opts.seed {
        Some(seed) => {
            let mut generator = HetuGen::with_seed(age, seed).map_err(|e| e.to_string())?;
            if let Some(today) = opts.today {
                generator = generator.with_today(today);
            }
            generator.next_n(opts.count)
        }
        None => {
            let mut generator = HetuGen::new(age).map_err(|e| e.to_string())?;
            if let Some(today) = opts.today {
                generator = generator.with_today(today);
            }
            generator.next_n(opts.count)
        }
    }
    .map_err(|e| e.to_string())?;

    info!(age, count = codes.len(), "created identity codes");
    for code in codes {
        println!("{code}");
    }
    Ok(())
}

fn run_selftest() -> Result<(), String> {
    let today = local_today();
    let mut rng = StdRng::seed_from_u64(0);
    // one birth year per century band
    for age in [1, 50, 150, 200] {
        let code = create_with_age_at(age, today, &mut rng).map_err(|e| e.to_string())?;
        let parsed = parse_hetu_at(&code, today).map_err(|e| e.to_string())?;
        if !parsed.valid || parsed.age_in_years != age as i32 {
            return Err(format!("selftest failed: {code} for age {age}"));
        }
        debug!(%code, age, "selftest round trip");
    }
    Ok(())
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_help();
        process::exit(2);
    }

    if args[0] == "-h" || args[0] == "--help" || args[0] == "help" {
        print_help();
        return;
    }

    let cmd = args[0].as_str();
    let rest = &args[1..];

    let res = match cmd {
        "validate" => run_validate(rest),
        "parse" => Defaults::from_env().and_then(|d| run_parse(rest, &d)),
        "create" => Defaults::from_env().and_then(|d| run_create(rest, &d)),
        "selftest" => run_selftest(),
        _ => Err(format!("unknown command: {}", cmd)),
    };

    if let Err(err) = res {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
