use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches};
use serialport::{FlowControl as SerialFlowControl, SerialPort};
use std::time::Duration;

pub struct CommandBuilder {
    command: clap::Command,
}

pub struct Command;

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuilder {
    pub fn new() -> Self {
        let command = clap::Command::new("LC29H device arguments")
            .about("Talks PAIR/PQTM to a Quectel LC29H receiver")
            .arg_required_else_help(true)
            .arg(
                Arg::new("port")
                    .value_name("port")
                    .short('p')
                    .long("port")
                    .required(true)
                    .help("Serial port to open to connect to the LC29H"),
            )
            .arg(
                Arg::new("baud")
                    .value_name("baud")
                    .short('s')
                    .long("baud")
                    .required(false)
                    .default_value("115200")
                    .value_parser(value_parser!(u32))
                    .help("Baud rate for the selected port"),
            )
            .arg(
                Arg::new("stop-bits")
                    .long("stop-bits")
                    .help("Number of stop bits for the selected port")
                    .required(false)
                    .value_parser(["1", "2"])
                    .default_value("1"),
            )
            .arg(
                Arg::new("data-bits")
                    .long("data-bits")
                    .help("Number of data bits for the selected port")
                    .required(false)
                    .value_parser(["7", "8"])
                    .default_value("8"),
            )
            .arg(
                Arg::new("parity")
                    .long("parity")
                    .help("Parity to use for selected port")
                    .required(false)
                    .value_parser(["even", "odd"]),
            )
            .arg(
                Arg::new("timeout")
                    .value_name("ms")
                    .long("timeout")
                    .required(false)
                    .default_value("1000")
                    .value_parser(value_parser!(u64))
                    .help("How long to wait for each reply sentence, in milliseconds"),
            );
        Self { command }
    }

    pub fn build(&self) -> clap::Command {
        self.command.clone()
    }
}

impl Command {
    pub fn baud(matches: &ArgMatches) -> u32 {
        matches.get_one::<u32>("baud").copied().unwrap_or(115200)
    }

    pub fn reply_timeout(matches: &ArgMatches) -> Duration {
        Duration::from_millis(matches.get_one::<u64>("timeout").copied().unwrap_or(1000))
    }

    pub fn serialport(matches: &ArgMatches) -> Result<Box<dyn SerialPort>> {
        let port = matches
            .get_one::<String>("port")
            .context("Expected required 'port' cli argument")?;

        let baud = Self::baud(matches);
        let stop_bits = match matches.get_one::<String>("stop-bits").map(|s| s.as_str()) {
            Some("2") => serialport::StopBits::Two,
            _ => serialport::StopBits::One,
        };
        let data_bits = match matches.get_one::<String>("data-bits").map(|s| s.as_str()) {
            Some("7") => serialport::DataBits::Seven,
            _ => serialport::DataBits::Eight,
        };
        let parity = match matches.get_one::<String>("parity").map(|s| s.as_str()) {
            Some("odd") => serialport::Parity::Odd,
            Some("even") => serialport::Parity::Even,
            _ => serialport::Parity::None,
        };

        let builder = serialport::new(port, baud)
            .stop_bits(stop_bits)
            .data_bits(data_bits)
            .timeout(Duration::from_millis(10))
            .parity(parity)
            .flow_control(SerialFlowControl::None);

        log::debug!("{:?}", &builder);
        builder
            .open()
            .with_context(|| format!("Failed to open port: {}", port))
    }

    /// Opens the port and wraps it into a [`crate::SerialTransport`]
    pub fn transport(matches: &ArgMatches) -> Result<crate::SerialTransport> {
        let port = Self::serialport(matches)?;
        Ok(crate::SerialTransport::new(
            port,
            Self::reply_timeout(matches),
        ))
    }
}
