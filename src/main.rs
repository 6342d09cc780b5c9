//! # petstore-client
//!
//! A command line probe for the pet store API. It calls one operation of one
//! resource client and prints the response, which makes it handy for checking that
//! an environment answers the way the test suite expects.
//!
//! ```text,no_run
//! $ petstore-client pet get 10
//! 200 OK
//! {
//!   "id": 10,
//!   "name": "doggie",
//!   "photoUrls": [],
//!   "status": "AVAILABLE",
//!   "tags": []
//! }
//!
//! $ petstore-client -s '%R (%T)\n' store inventory
//! 200 OK (183ms)
//! ```
//!
//! The target is read from `application.toml` (or the file named by `--config` or
//! `PETSTORE_CONFIG`) and `PETSTORE_*` environment variables, for example:
//!
//! ```text,no_run
//! [base]
//! url = "http://localhost:8080/v2"
//!
//! [api]
//! key = "special-key"
//! ```
//!
//! Use `-v`, `-vv` or `-vvv` to see the requests being sent, or set `RUST_LOG`.

use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use petstore_client::clients::{PetClient, StoreClient, UserClient};
use petstore_client::http_client::reqwest::ReqwestHttpClient;
use petstore_client::http_client::{ClientConfig, HttpClient};
use petstore_client::model::PetStatus;
use petstore_client::output::{parse_format, print::FormattedOutputter, Outputter};
use petstore_client::{Configuration, Response};
use std::io::stdout;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let matches = App::new("petstore-client")
        .version(VERSION)
        .about("Calls the pet store API and prints the response")
        .author("Brian Payne")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("CONFIG_FILE")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("A configuration file with base.url, api.key and test.timeout"),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .short("v")
                .multiple(true)
                .help("Log requests and responses, repeat for more detail"),
        )
        .arg(
            Arg::with_name("ACCEPT_INVALID_CERT")
                .short("k")
                .long("danger-accept-invalid-certs")
                .help("Controls the use of certificate validation."),
        )
        .arg(
            Arg::with_name("RESPONSE_OUTPUT_FORMAT")
                .long("response-output-format")
                .short("s")
                .default_value("%R\n%B\n")
                .hide_default_value(true)
                .help("Define the format for print the response, possible options %R status line, %H headers, %B body, %T elapsed time \n[default: %R\\n%B\\n]")
        )
        .subcommand(
            SubCommand::with_name("pet")
                .about("Pet operations")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(SubCommand::with_name("get").arg(id_arg()))
                .subcommand(SubCommand::with_name("delete").arg(id_arg()))
                .subcommand(
                    SubCommand::with_name("find-by-status").arg(
                        Arg::with_name("STATUS")
                            .required(true)
                            .multiple(true)
                            .help("AVAILABLE, PENDING or SOLD; anything else is sent as is"),
                    ),
                )
                .subcommand(
                    SubCommand::with_name("find-by-tags")
                        .arg(Arg::with_name("TAG").required(true).multiple(true)),
                ),
        )
        .subcommand(
            SubCommand::with_name("store")
                .about("Store operations")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(SubCommand::with_name("inventory"))
                .subcommand(SubCommand::with_name("order").arg(id_arg()))
                .subcommand(SubCommand::with_name("delete-order").arg(id_arg())),
        )
        .subcommand(
            SubCommand::with_name("user")
                .about("User operations")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(SubCommand::with_name("get").arg(username_arg()))
                .subcommand(SubCommand::with_name("delete").arg(username_arg()))
                .subcommand(
                    SubCommand::with_name("login")
                        .arg(username_arg())
                        .arg(Arg::with_name("PASSWORD").required(true).index(2)),
                )
                .subcommand(SubCommand::with_name("logout")),
        )
        .get_matches();

    init_logging(matches.occurrences_of("VERBOSE"));

    let config = match matches.value_of("CONFIG_FILE") {
        Some(file) => Configuration::load(file),
        None => Configuration::get_instance().clone(),
    };
    let ignore_certificates: bool = matches.is_present("ACCEPT_INVALID_CERT");
    let client: Arc<dyn HttpClient> = Arc::new(
        ReqwestHttpClient::create(ClientConfig::new(!ignore_certificates))
            .context("Failed creating the http client")?,
    );
    let response_format = matches.value_of("RESPONSE_OUTPUT_FORMAT").unwrap_or("%R\n%B\n");

    let response = match matches.subcommand() {
        ("pet", Some(pet)) => run_pet(&PetClient::with_http_client(&config, client), pet)?,
        ("store", Some(store)) => {
            run_store(&StoreClient::with_http_client(&config, client), store)?
        }
        ("user", Some(user)) => run_user(&UserClient::with_http_client(&config, client), user)?,
        (other, _) => return Err(anyhow!("Unknown resource '{}'", other)),
    };

    let mut stdout = stdout();
    let mut outputter = FormattedOutputter::new(&mut stdout, parse_format(response_format)?);
    outputter.response(&response)
}

fn id_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("ID")
        .required(true)
        .index(1)
        .validator(is_valid_id)
}

fn username_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("USERNAME").required(true).index(1)
}

fn run_pet(client: &PetClient, matches: &ArgMatches) -> Result<Response> {
    let response = match matches.subcommand() {
        ("get", Some(args)) => client.get_pet_by_id(id(args)?)?,
        ("delete", Some(args)) => client.delete_pet(id(args)?)?,
        ("find-by-status", Some(args)) => {
            let raw: Vec<&str> = args.values_of("STATUS").into_iter().flatten().collect();
            let statuses: Option<Vec<PetStatus>> =
                raw.iter().map(|status| status.parse().ok()).collect();
            match statuses {
                Some(statuses) => client.find_pets_by_status(&statuses)?,
                None => client.find_pets_by_status_raw(&raw.join(","))?,
            }
        }
        ("find-by-tags", Some(args)) => {
            let tags: Vec<&str> = args.values_of("TAG").into_iter().flatten().collect();
            client.find_pets_by_tags(&tags)?
        }
        (other, _) => return Err(anyhow!("Unknown pet operation '{}'", other)),
    };
    Ok(response)
}

fn run_store(client: &StoreClient, matches: &ArgMatches) -> Result<Response> {
    let response = match matches.subcommand() {
        ("inventory", Some(_)) => client.get_inventory()?,
        ("order", Some(args)) => client.get_order_by_id(id(args)?)?,
        ("delete-order", Some(args)) => client.delete_order(id(args)?)?,
        (other, _) => return Err(anyhow!("Unknown store operation '{}'", other)),
    };
    Ok(response)
}

fn run_user(client: &UserClient, matches: &ArgMatches) -> Result<Response> {
    let response = match matches.subcommand() {
        ("get", Some(args)) => client.get_user_by_username(username(args)?)?,
        ("delete", Some(args)) => client.delete_user(username(args)?)?,
        ("login", Some(args)) => {
            let password = args
                .value_of("PASSWORD")
                .ok_or_else(|| anyhow!("PASSWORD is required"))?;
            client.login_user(username(args)?, password)?
        }
        ("logout", Some(_)) => client.logout_user()?,
        (other, _) => return Err(anyhow!("Unknown user operation '{}'", other)),
    };
    Ok(response)
}

fn id(args: &ArgMatches) -> Result<i64> {
    let id = args.value_of("ID").ok_or_else(|| anyhow!("ID is required"))?;
    id.parse()
        .with_context(|| format!("Invalid id: {}", id))
}

fn username<'a>(args: &'a ArgMatches) -> Result<&'a str> {
    args.value_of("USERNAME")
        .ok_or_else(|| anyhow!("USERNAME is required"))
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("petstore_client={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_valid_id(val: String) -> Result<(), String> {
    match val.parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("Id is not a valid integer")),
    }
}
