use call_center::config::ScenarioConfig;
use call_center::output::write_results_csv;
use call_center::scenarios::run_all_scenarios_parallel;

fn main() {
    println!("========================================");
    println!("Call Center Simulation");
    println!("========================================");

    let configs = ScenarioConfig::all_three();

    println!("\nScenario   | Agents | Mean service | Mean gap | Horizon");
    println!("-----------+--------+--------------+----------+--------");
    for config in &configs {
        println!(
            "{:<10} | {:>6} | {:>9} min | {:>5} min | {:>4} min",
            config.name,
            config.agents,
            config.mean_service_time,
            config.mean_arrival_gap,
            config.horizon
        );
    }

    let results = match run_all_scenarios_parallel() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    for result in &results {
        result.print_summary();
    }

    println!("\n========================================");
    println!("Summary Comparison");
    println!("========================================\n");

    println!(
        "{:<12} {:>7} {:>10} {:>10} {:>11} {:>12}",
        "Scenario", "Agents", "Avg Wait", "Avg Queue", "Throughput", "Utilization"
    );
    println!(
        "{:-<12} {:->7} {:->10} {:->10} {:->11} {:->12}",
        "", "", "", "", "", ""
    );
    for result in &results {
        println!(
            "{:<12} {:>7} {:>10.2} {:>10.2} {:>11.2} {:>12.2}",
            result.config.name,
            result.stats.agents,
            result.stats.avg_wait,
            result.stats.avg_queue_length,
            result.stats.throughput,
            result.stats.utilization
        );
    }

    if let Err(e) = write_results_csv("results.csv", &results) {
        eprintln!("failed to write results.csv: {}", e);
        std::process::exit(1);
    }
    println!("\nAll scenario results saved to 'results.csv'");
}
