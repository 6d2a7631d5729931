// IME Sweep - Free and Open Source Software Statement
//
// This project, ime-sweep, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/help/commands.rs
// Version: 1.1.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides command-line help and examples for ime-sweep: the
// sweep run, output clearing, module loading and the runtime knobs.
//
// Tree Location:
// - src/help/commands.rs (command help and examples)
// - Depends on: none

/// Print extended help information with detailed descriptions
pub fn print_extended_help() {
    println!("COMMAND LINE OPTIONS:");
    println!("=====================");
    println!();

    println!("SWEEP:");
    println!("  -f, --file <PATH>          Sweep configuration to execute");
    println!("  -c, --clear                Remove log, partial, result, their .N versions and the oracle tree, then exit");
    println!("  --load-module <DIR>        Run xclean.sh and the irq/nmi load script from DIR first");
    println!("  --policy <first|mean|median> Reduction of repeated runs [default: median]");
    println!();

    println!("EXTERNAL TOOLS:");
    println!("  --profiler <PATH>          Profiler control tool [default: ../../main/profiler]");
    println!("  --device-dir <DIR>         Sampling device directory [default: /dev/hop]");
    println!("  --control-entry <NAME>     Entry of DIR that is not a device [default: ctl]");
    println!("  --time-cmd <CMD>           Timing wrapper printing 'wall, user, sys'");
    println!("  --thread-flag <FLAG>       Workload flag before the thread count [default: -n]");
    println!("  --timeout <SEC>            Limit for every external call [default: 3600]");
    println!();

    println!("OUTPUT AND LOGGING:");
    println!("  --output-dir <DIR>         Where log/ and result/ are created [default: .]");
    println!("  --log-config <YML>         log4rs configuration file");
    println!("  -v, --verbose              Log every external call");
    println!();

    println!("DISPLAY:");
    println!("  -h, --help                 Show this help message");
    println!("  --help-config              Describe the configuration language");
    println!("  -V, --version              Show version information");
}

/// Get practical command examples
pub fn get_command_examples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Run a sweep", "ime-sweep -f sweep.cfg"),
        (
            "Reload the NMI module before sweeping",
            "ime-sweep -f sweep.cfg --load-module ../../driver",
        ),
        (
            "Report the mean of repeated runs",
            "ime-sweep -f sweep.cfg --policy mean",
        ),
        ("Remove every previous output", "ime-sweep -c"),
        (
            "Collect the oracle baseline and injected levels",
            "ime-sweep --oracle --template main.c.origin --inject-target main.c --build-cmd make",
        ),
        ("Compute overhead ratios", "ime-sweep --overhead"),
    ]
}

/// Print command examples with descriptions
pub fn print_command_examples() {
    println!("USAGE EXAMPLES:");
    println!("===============");
    println!();

    for (description, command) in get_command_examples() {
        println!("{}:", description);
        println!("  {}", command);
        println!();
    }
}

// Changelog:
// - v1.1.1 (2026-10-16): --clear names the directories it removes.
// - v1.1.0 (2026-10-14): Oracle and overhead examples.
// - v1.0.0 (2026-10-06): Command help for the sweep harness.
//   - Purpose: Lists every flag with its default and common invocations.
