fn main() {
    if let Err(e) = agentledger::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
