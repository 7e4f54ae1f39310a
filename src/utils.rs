/// Create a "verbose" switch for ansible-playbook.
///
/// Example: verbosity = 2 --> "-vv"
pub fn create_verbose_switch(verbosity: u8) -> String {
    if verbosity == 0 {
        return String::new();
    }

    format!("-{}", "v".repeat(verbosity as usize))
}
