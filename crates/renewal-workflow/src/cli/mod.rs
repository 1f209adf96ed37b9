/*
[INPUT]:  CLI subcommands for the renewal-workflow binary
[OUTPUT]: Interactive renewal screen and config initialization
[POS]:    CLI layer module wiring
[UPDATE]: When adding CLI flows
*/

pub mod init;
pub mod screen;
