use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgMatches};
use lc29::{
    AckKind, CommandDescriptor, Constellations, DgpsMode, Driver, DriverConfig, NavigationMode,
    NmeaSentence, RestartKind,
};
use lc29_device::{cli::Command, SerialTransport};
use log::{error, info};

const PARAMETERS: [&str; 12] = [
    "fix-rate",
    "min-snr",
    "static-threshold",
    "elevation-mask",
    "navigation-mode",
    "dual-band",
    "sbas",
    "dgps-mode",
    "easy",
    "search-mode",
    "baud-rate",
    "nmea-rate",
];

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("LC29_LOGLEVEL")
        .init();

    let cli = lc29_device::cli::CommandBuilder::default()
        .build()
        .name("lc29-cli")
        .arg(
            Arg::new("no-checksum")
                .long("no-checksum")
                .action(clap::ArgAction::SetTrue)
                .help("Accept replies whose checksum does not match"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(clap::ArgAction::SetTrue)
                .help("Reject replies carrying non-numeric fields"),
        )
        .arg(
            Arg::new("unsolicited")
                .long("unsolicited")
                .value_parser(value_parser!(usize))
                .default_value("32")
                .help("Foreign sentences to skip while waiting for a reply"),
        )
        .subcommand_required(true)
        .subcommand(clap::Command::new("status").about("Query every parameter and print the state as JSON"))
        .subcommand(
            clap::Command::new("get")
                .about("Query a single parameter")
                .arg(Arg::new("parameter").required(true).value_parser(PARAMETERS))
                .arg(
                    Arg::new("sentence")
                        .long("sentence")
                        .default_value("gga")
                        .value_parser(["gga", "gll", "gsa", "gsv", "rmc", "vtg"])
                        .help("Sentence type for nmea-rate"),
                ),
        )
        .subcommand(
            clap::Command::new("set")
                .about("Set a single parameter")
                .arg(Arg::new("parameter").required(true).value_parser(PARAMETERS))
                .arg(Arg::new("value").required(true))
                .arg(
                    Arg::new("sentence")
                        .long("sentence")
                        .default_value("gga")
                        .value_parser(["gga", "gll", "gsa", "gsv", "rmc", "vtg"])
                        .help("Sentence type for nmea-rate"),
                ),
        )
        .subcommand(
            clap::Command::new("restart")
                .about("Restart the receiver")
                .arg(
                    Arg::new("kind")
                        .default_value("hot")
                        .value_parser(["hot", "warm", "cold", "full-cold"]),
                ),
        )
        .subcommand(clap::Command::new("save").about("Save the current configuration to NVM"))
        .subcommand(
            clap::Command::new("raw")
                .about("Send an arbitrary PAIR or PQTM set command and wait for its acknowledgement")
                .arg(Arg::new("identifier").required(true).help("e.g. $PAIR050 or $PQTMSAVEPAR"))
                .arg(Arg::new("args").num_args(0..)),
        );

    let matches = cli.get_matches();

    let config = DriverConfig::default()
        .with_verify_checksum(!matches.get_flag("no-checksum"))
        .with_field_parsing(if matches.get_flag("strict") {
            lc29::FieldParsing::Strict
        } else {
            lc29::FieldParsing::Lenient
        })
        .with_max_unsolicited(matches.get_one::<usize>("unsolicited").copied().unwrap_or(0));

    let transport = Command::transport(&matches)?;
    info!(
        "Opened {} at {} baud",
        transport.port_name().unwrap_or_default(),
        Command::baud(&matches)
    );
    let mut driver = Driver::with_config(transport, config);
    driver.initialize()?;

    match matches.subcommand() {
        Some(("status", _)) => status(&mut driver)?,
        Some(("get", sub)) => get(&mut driver, sub)?,
        Some(("set", sub)) => set(&mut driver, sub)?,
        Some(("restart", sub)) => {
            let kind = match sub.get_one::<String>("kind").map(|s| s.as_str()) {
                Some("warm") => RestartKind::Warm,
                Some("cold") => RestartKind::Cold,
                Some("full-cold") => RestartKind::FullCold,
                _ => RestartKind::Hot,
            };
            driver.restart(kind)?;
            info!("{kind:?} restart acknowledged");
        },
        Some(("save", _)) => {
            driver.save_to_nvm()?;
            info!("Configuration saved");
        },
        Some(("raw", sub)) => raw(&mut driver, sub)?,
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}

fn status(driver: &mut Driver<SerialTransport>) -> Result<()> {
    for parameter in PARAMETERS.iter().filter(|p| **p != "nmea-rate") {
        if let Err(e) = query(driver, parameter, NmeaSentence::Gga) {
            error!("{parameter}: {e}");
        }
    }
    for &sentence in NmeaSentence::ALL {
        if let Err(e) = driver.get_nmea_output_rate(sentence) {
            error!("nmea-rate {sentence}: {e}");
        }
    }
    if let Err(e) = driver.get_ins_messages() {
        error!("ins-messages: {e}");
    }
    println!("{}", serde_json::to_string_pretty(driver.state())?);
    Ok(())
}

fn sentence_arg(matches: &ArgMatches) -> NmeaSentence {
    match matches.get_one::<String>("sentence").map(|s| s.as_str()) {
        Some("gll") => NmeaSentence::Gll,
        Some("gsa") => NmeaSentence::Gsa,
        Some("gsv") => NmeaSentence::Gsv,
        Some("rmc") => NmeaSentence::Rmc,
        Some("vtg") => NmeaSentence::Vtg,
        _ => NmeaSentence::Gga,
    }
}

fn get(driver: &mut Driver<SerialTransport>, matches: &ArgMatches) -> Result<()> {
    let parameter = matches
        .get_one::<String>("parameter")
        .context("Expected required 'parameter' argument")?;
    println!("{}", query(driver, parameter, sentence_arg(matches))?);
    Ok(())
}

fn query(
    driver: &mut Driver<SerialTransport>,
    parameter: &str,
    sentence: NmeaSentence,
) -> Result<serde_json::Value> {
    let value = match parameter {
        "fix-rate" => serde_json::to_value(driver.get_fix_rate()?)?,
        "min-snr" => serde_json::to_value(driver.get_min_snr()?)?,
        "static-threshold" => serde_json::to_value(driver.get_static_threshold()?)?,
        "elevation-mask" => serde_json::to_value(driver.get_elevation_mask()?)?,
        "navigation-mode" => serde_json::to_value(driver.get_navigation_mode()?)?,
        "dual-band" => serde_json::to_value(driver.get_dual_band()?)?,
        "sbas" => serde_json::to_value(driver.get_sbas()?)?,
        "dgps-mode" => serde_json::to_value(driver.get_dgps_mode()?)?,
        "easy" => serde_json::to_value(driver.get_easy_status()?)?,
        "search-mode" => serde_json::to_value(driver.get_gnss_search_mode()?)?,
        "baud-rate" => serde_json::to_value(driver.get_baud_rate()?)?,
        "nmea-rate" => serde_json::to_value(driver.get_nmea_output_rate(sentence)?)?,
        other => bail!("Unknown parameter {other}"),
    };
    Ok(value)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "1" | "on" | "true" => Ok(true),
        "0" | "off" | "false" => Ok(false),
        other => bail!("Expected on/off, got {other}"),
    }
}

fn parse_constellations(value: &str) -> Result<Constellations> {
    let mut mask = Constellations::empty();
    for name in value.split(',') {
        mask |= match name.trim().to_ascii_lowercase().as_str() {
            "gps" => Constellations::GPS,
            "glonass" => Constellations::GLONASS,
            "galileo" => Constellations::GALILEO,
            "beidou" => Constellations::BEIDOU,
            "qzss" => Constellations::QZSS,
            other => bail!("Unknown constellation {other}"),
        };
    }
    Ok(mask)
}

fn set(driver: &mut Driver<SerialTransport>, matches: &ArgMatches) -> Result<()> {
    let parameter = matches
        .get_one::<String>("parameter")
        .context("Expected required 'parameter' argument")?;
    let value = matches
        .get_one::<String>("value")
        .context("Expected required 'value' argument")?;
    let number = || -> Result<i64> {
        value
            .parse::<i64>()
            .with_context(|| format!("{parameter} expects a number, got {value}"))
    };

    match parameter.as_str() {
        "fix-rate" => driver.set_fix_rate(number()?.try_into()?)?,
        "min-snr" => driver.set_min_snr(number()?.try_into()?)?,
        "static-threshold" => driver.set_static_threshold(number()?.try_into()?)?,
        "elevation-mask" => driver.set_elevation_mask(number()?.try_into()?)?,
        "navigation-mode" => {
            let mode = NavigationMode::from_code(number()?)
                .context("Navigation mode is one of 0, 1, 4, 7")?;
            driver.set_navigation_mode(mode)?
        },
        "dual-band" => driver.set_dual_band(parse_flag(value)?)?,
        "sbas" => driver.set_sbas(parse_flag(value)?)?,
        "dgps-mode" => {
            let mode = DgpsMode::from_code(number()?).context("DGPS mode is one of 0, 1, 2")?;
            driver.set_dgps_mode(mode)?
        },
        "easy" => driver.set_easy(parse_flag(value)?)?,
        "search-mode" => driver.set_gnss_search_mode(parse_constellations(value)?)?,
        "baud-rate" => {
            let baud: u32 = number()?.try_into()?;
            driver.set_baud_rate(baud)?;
            driver.configure_transport(baud)?;
        },
        "nmea-rate" => {
            driver.set_nmea_output_rate(sentence_arg(matches), number()?.try_into()?)?
        },
        other => bail!("Unknown parameter {other}"),
    }
    info!("{parameter} set to {value}");
    Ok(())
}

fn raw(driver: &mut Driver<SerialTransport>, matches: &ArgMatches) -> Result<()> {
    let identifier = matches
        .get_one::<String>("identifier")
        .context("Expected required 'identifier' argument")?;
    let args: Vec<&str> = matches
        .get_many::<String>("args")
        .map(|values| values.map(|s| s.as_str()).collect())
        .unwrap_or_default();
    // descriptors hold &'static identifiers; the process exits right after
    let identifier: &'static str = Box::leak(identifier.clone().into_boxed_str());
    let mut descriptor = CommandDescriptor::set(identifier, args.len());
    if identifier.starts_with("$PQTM") {
        descriptor = descriptor.with_ack(AckKind::Pqtm);
    }
    let fields = driver.execute(&descriptor, &args)?;
    println!("{fields:?}");
    Ok(())
}
