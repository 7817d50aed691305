mod temporal_format_tests;
