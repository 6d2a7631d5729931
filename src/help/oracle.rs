// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/help/oracle.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file explains the oracle collection and overhead passes.
//
// Tree Location:
// - src/help/oracle.rs (oracle pipeline help)
// - Depends on: none

/// Print oracle pipeline help
pub fn print_oracle_help() {
    println!("ORACLE PIPELINE:");
    println!("================");
    println!();
    println!("--oracle collects one series per injection level. Level 0 is the baseline.");
    println!("For every level the template's #INJECT lines become <level> xchgq pairs,");
    println!("the build command runs, and for every frequency the workload runs once.");
    println!();
    println!("  --workload <CMD>           Workload run per frequency [default: ./hot_page 1 10]");
    println!("  --frequencies <F,F,...>    [default: 0x0,0x1,0x4,0x10,0x100,0x1000,0x10000]");
    println!("  --injections <L,L,...>     [default: 0,1,2,5,10,25,50,100]");
    println!("  --template <PATH>          Source with #INJECT markers");
    println!("  --inject-target <PATH>     File the rendered source is written to");
    println!("  --build-cmd <CMD>          Rebuilds the workload after rendering");
    println!("  --sample-prefix <P>        Address prefix of kept samples [default: 0x4]");
    println!("  --results-dir <DIR>        [default: results]");
    println!();
    println!("--overhead divides every level's sample counts by the baseline's, matching");
    println!("buckets by frequency. Both series must list the same frequencies in the same");
    println!("order. Buckets with sampling off are skipped; a zero baseline is an error.");
    println!();
    println!("FILES (under --results-dir):");
    println!("  info/ime<L>.dat            <freq>\\t<samples>\\t<elapsed ms>");
    println!("  info/oracle_info.dat       <L>\\t<elapsed ms>");
    println!("  info/ovh<L>.dat            <freq>\\t<ratio>");
    println!("  data/hop<L>_<freq>.dat     Filtered, sorted samples");
    println!("  data/agg<L>.dat            Sample totals per frequency");
}

// Changelog:
// - v1.0.0 (2026-10-14): Oracle pipeline help.
