mod capture_test;
