mod integration_tests;
