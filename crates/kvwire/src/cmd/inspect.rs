use kvwire_dict::dump::hex_dump;

use crate::cmd::{read_input, InspectArgs};
use crate::exit::{io_error, CliResult, SUCCESS};

pub fn run(args: InspectArgs) -> CliResult<i32> {
    let buf = read_input(&args.input)
        .map_err(|err| io_error(&format!("failed reading {}", args.input.display()), err))?;
    let mut stdout = std::io::stdout().lock();
    hex_dump(&mut stdout, &buf).map_err(|err| io_error("failed writing dump", err))?;
    Ok(SUCCESS)
}
