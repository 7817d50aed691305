mod driver_resolution_tests;
mod graph_tables_tests;
