use crate::cli::{Commands, ConsumptionCommand, PurchaseCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Forecast { json, .. }
        | Commands::History { json }
        | Commands::Totals { json, .. }
        | Commands::Purchase {
            command: PurchaseCommand::Add { json, .. },
        }
        | Commands::Consumption {
            command: ConsumptionCommand::Add { json, .. },
        } => *json,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
