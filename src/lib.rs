pub mod cohort;
pub mod config;
pub mod dataset;
pub mod error;
pub mod per90;
pub mod percentile;
pub mod pipeline;
pub mod pizza_export;
pub mod presentation;
pub mod stat_columns;
