//! Operator help text

use core::fmt;

/// Services that can be exercised from the support view
pub const SUPPORT_DRIVERS: &[&str] = &["GetVariable"];

/// Help pages the menu can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    /// Key bindings of the menu
    Usage,
    /// Support-driver list
    SupportDrivers,
}

impl HelpTopic {
    /// Writes this page to `console`
    pub fn render<W: fmt::Write + ?Sized>(&self, console: &mut W) {
        let _ = self.write_to(console);
    }

    fn write_to<W: fmt::Write + ?Sized>(&self, console: &mut W) -> fmt::Result {
        match self {
            HelpTopic::Usage => {
                writeln!(console, "This shell application has the following operations:")?;
                writeln!(console, "  1. Enter 'F' or 'f' to run the fuzzer.")?;
                writeln!(console, "  2. Enter 'N' or 'n' to run normal operations.")?;
                writeln!(console, "  3. Enter 'S' or 's' to see the support drivers.")?;
                writeln!(console, "  4. Hit <ESC> to exit the application.")
            }
            HelpTopic::SupportDrivers => {
                writeln!(console, "Support Drivers:")?;
                for driver in SUPPORT_DRIVERS {
                    writeln!(console, "  -{}", driver)?;
                }
                Ok(())
            }
        }
    }
}
