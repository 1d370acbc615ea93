pub mod dispatch;
pub mod external;
pub mod pipeline;

/// How a command line hands control back to the session loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	/// Carry on with the next line
	Continue,
	/// The line ended early on purpose (`output`)
	EndCycle,
	/// Leave the session (`stop`, end of input)
	Exit,
}
