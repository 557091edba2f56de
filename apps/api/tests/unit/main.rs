mod test_reports;
