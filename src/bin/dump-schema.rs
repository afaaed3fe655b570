use std::error::Error;

use dotenv::dotenv;
use log::{debug, initialize_logger};
use structopt::StructOpt;

use intake::config::{load_schema, schema_override};
use intake::schema::FormKind;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dump-schema",
    about = "Print the schema a form is currently served with"
)]
struct Opt {
    /// The form to print (`apply` or `contact`)
    form: FormKind,

    /// Indent the output
    #[structopt(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let opt = Opt::from_args();

    let logger = initialize_logger();

    let path = schema_override(opt.form);
    debug!(logger, "Loading schema..."; "form" => opt.form.path(), "override" => ?path);

    let schema = load_schema(opt.form, path.as_deref())?;

    let output = if opt.pretty {
        serde_json::to_string_pretty(&schema)?
    } else {
        serde_json::to_string(&schema)?
    };

    println!("{}", output);

    Ok(())
}
