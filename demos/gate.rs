use notify_condition::Condition;
use tracing_subscriber::EnvFilter;

// Usage: cargo run --example gate -- '(Minecraft.Contains(Mine) || 30 > 30)'
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    for argument in std::env::args().skip(1) {
        let condition = Condition::new(argument);
        let verdict = if condition.evaluate() {
            "notify"
        } else {
            "withhold"
        };
        println!("{verdict}\t{condition}");
    }
}
