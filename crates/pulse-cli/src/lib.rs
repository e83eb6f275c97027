use clap::ValueEnum;
use pulse_core::Strategy;

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Table,
}

/// Device profile PageSpeed emulates
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    Mobile,
    #[default]
    Desktop,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Mobile => Strategy::Mobile,
            StrategyArg::Desktop => Strategy::Desktop,
        }
    }
}
