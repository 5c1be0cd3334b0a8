//! wash-sale - Apply wash-sale adjustments to a CSV of stock lots.

fn main() -> std::process::ExitCode {
    washsale::cmd::wash::main()
}
