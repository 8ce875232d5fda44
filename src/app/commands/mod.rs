pub mod archive;
pub mod new_run;
pub mod token;
pub mod upload;
