pub mod list_file;
pub mod results_writer;

pub use list_file::write_list;
pub use results_writer::ResultsWriter;
