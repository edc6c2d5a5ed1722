//! Print the GraphQL schema in SDL form.

use color_eyre::eyre::Result;
use feedql::inbound::graphql::build_schema;

fn main() -> Result<()> {
    color_eyre::install()?;
    print!("{}", build_schema().sdl());
    Ok(())
}
