use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::params::Params;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProgramMode {
    /// many independent runs, magnitude statistics
    Distribution,
    /// one run with the full per-block time series
    Single,
}

impl FromStr for ProgramMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distribution" => Ok(ProgramMode::Distribution),
            "single" => Ok(ProgramMode::Single),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub params: Params,
    pub mode: ProgramMode,
    pub seed: u64,
    pub threads: usize,
    pub prefix: String,
    /// block whose series is echoed in single mode
    pub block: usize,
    pub save_config: Option<PathBuf>,
}

impl Config {

    // initialize configuration from command line arguments
    pub fn new() -> Result<Config, ConfigError> {
        Config::from_matches(&Config::app().get_matches())
    }

    pub fn app() -> App<'static, 'static> {
        App::new("Burridge-Knopoff earthquake simulation")
            .version("0.1.0")
            .author("Ian Graham <irgraham1@gmail.com>")
            .about("Drives a chain of frictional blocks with a slowly moving plate and records the moment of every stick-slip earthquake.")
            .arg(Arg::with_name("MODE")
                .short("m")
                .long("mode")
                .help("distribution: magnitude statistics over many runs; single: one run with full time series")
                .takes_value(true)
                .possible_values(&["distribution", "single"])
                .default_value("distribution"))
            .arg(Arg::with_name("CONFIG")
                .short("c")
                .long("config")
                .help("TOML file holding the model parameters (created with defaults if missing)")
                .takes_value(true))
            .arg(Arg::with_name("SAVE")
                .long("save-config")
                .help("Write the effective model parameters to this TOML file")
                .takes_value(true))
            .arg(Arg::with_name("NUM")
                .short("n")
                .long("num")
                .help("Number of blocks in the chain")
                .takes_value(true))
            .arg(Arg::with_name("EVENTS")
                .short("e")
                .long("events")
                .help("Number of independent runs in distribution mode")
                .takes_value(true))
            .arg(Arg::with_name("TFINAL")
                .short("t")
                .long("tfinal")
                .help("Simulated time of every run")
                .takes_value(true))
            .arg(Arg::with_name("DT1")
                .long("dt1")
                .help("Coarse timestep used while every block sticks")
                .takes_value(true))
            .arg(Arg::with_name("DT2")
                .long("dt2")
                .help("Fine timestep used during earthquakes")
                .takes_value(true))
            .arg(Arg::with_name("V0")
                .long("v0")
                .help("Driver plate velocity")
                .takes_value(true))
            .arg(Arg::with_name("RAND")
                .long("rand")
                .help("Magnitude of the random initial displacement")
                .takes_value(true))
            .arg(Arg::with_name("EQUIL")
                .long("equil")
                .help("Start every block at zero displacement"))
            .arg(Arg::with_name("SEED")
                .long("seed")
                .help("Random seed for the initial displacements")
                .takes_value(true)
                .default_value("0"))
            .arg(Arg::with_name("THREADS")
                .long("threads")
                .help("Worker threads for distribution mode (0 picks automatically)")
                .takes_value(true)
                .default_value("0"))
            .arg(Arg::with_name("PREFIX")
                .short("o")
                .long("prefix")
                .help("Prefix of the output files")
                .takes_value(true)
                .default_value(""))
            .arg(Arg::with_name("BLOCK")
                .long("block")
                .help("Block reported on stdout in single mode")
                .takes_value(true)
                .default_value("9"))
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Config, ConfigError> {
        let mut params: Params = match matches.value_of("CONFIG") {
            Some(path) => confy::load_path(path)?,
            None => Params::default(),
        };

        if let Some(num) = Config::opt_match::<usize>(matches, "NUM")? {
            params.num = num;
        }
        if let Some(events) = Config::opt_match::<usize>(matches, "EVENTS")? {
            params.n_events = events;
        }
        if let Some(t_final) = Config::opt_match::<f64>(matches, "TFINAL")? {
            params.t_final = t_final;
        }
        if let Some(dt) = Config::opt_match::<f64>(matches, "DT1")? {
            params.dt_coarse = dt;
        }
        if let Some(dt) = Config::opt_match::<f64>(matches, "DT2")? {
            params.dt_fine = dt;
        }
        if let Some(v0) = Config::opt_match::<f64>(matches, "V0")? {
            params.v0 = v0;
        }
        if let Some(rand) = Config::opt_match::<f64>(matches, "RAND")? {
            params.rand = rand;
        }
        if matches.is_present("EQUIL") {
            params.equil = true;
        }
        params.validate()?;

        Ok(Config {
            params,
            mode: Config::conv_match(matches, "MODE")?,
            seed: Config::conv_match(matches, "SEED")?,
            threads: Config::conv_match(matches, "THREADS")?,
            prefix: matches.value_of("PREFIX").unwrap_or("").to_string(),
            block: Config::conv_match(matches, "BLOCK")?,
            save_config: matches.value_of("SAVE").map(PathBuf::from),
        })
    }

    // format output file suffix with configuration data
    pub fn format_file_suffix(&self) -> String {
        let p = &self.params;
        format!("n{}_tf{}_dt{}_{}_v{}_seed{}",
                p.num, p.t_final, p.dt_coarse, p.dt_fine, p.v0, self.seed)
    }

    // convert matches to corresponding generic types
    fn conv_match<T>(matches: &ArgMatches, tag: &str) -> Result<T, ConfigError>
        where T: FromStr {
        let value = matches.value_of(tag).unwrap_or_default();
        T::from_str(value).map_err(|_| ConfigError::BadValue {
            tag: tag.to_string(),
            value: value.to_string(),
        })
    }

    fn opt_match<T>(matches: &ArgMatches, tag: &str) -> Result<Option<T>, ConfigError>
        where T: FromStr {
        match matches.value_of(tag) {
            Some(_) => Config::conv_match(matches, tag).map(Some),
            None => Ok(None),
        }
    }
}
