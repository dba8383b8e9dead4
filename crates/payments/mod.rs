pub mod simulated_processor;
