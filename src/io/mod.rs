pub mod matfile;
