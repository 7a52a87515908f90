pub mod analysis_data;
