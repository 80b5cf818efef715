#[cfg(test)]
mod tests {
    use crate::error::CleaningError;
    use crate::parsing::csv_parser::parse_listings_csv;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    /// Test parsing a CSV with the Airbnb listing columns
    #[test]
    fn test_parse_listings_csv_basic() {
        let csv_content = "id,name,neighbourhood_group,latitude,longitude,price,last_review\n\
            2539,Clean & quiet apt home by the park,Brooklyn,40.64749,-73.97237,149,2018-10-19\n\
            2595,Skylit Midtown Castle,Manhattan,40.75362,-73.98377,225,2019-05-21\n";

        let temp_file = create_temp_csv(csv_content);
        let result = parse_listings_csv(temp_file.path());

        assert!(result.is_ok(), "Should parse basic CSV: {:?}", result.err());
        let df = result.unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 7);
    }

    /// Columns keep their file order and are read as text
    #[test]
    fn test_columns_read_as_text_in_file_order() {
        let csv_content = "price,id,last_review,latitude,longitude\n\
            100,1,2019-01-01,40.7,-73.9\n";

        let temp_file = create_temp_csv(csv_content);
        let df = parse_listings_csv(temp_file.path()).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["price", "id", "last_review", "latitude", "longitude"]);

        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
    }

    /// Missing price column is reported by name
    #[test]
    fn test_missing_price_column() {
        let csv_content = "id,latitude,longitude,last_review\n1,40.7,-73.9,2019-01-01\n";

        let temp_file = create_temp_csv(csv_content);
        let err = parse_listings_csv(temp_file.path()).unwrap_err();

        match err {
            CleaningError::MissingColumn { column } => assert_eq!(column, "price"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    /// Missing last_review column is also fatal
    #[test]
    fn test_missing_last_review_column() {
        let csv_content = "price,latitude,longitude\n10,40.7,-73.9\n";

        let temp_file = create_temp_csv(csv_content);
        let err = parse_listings_csv(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("last_review"));
    }

    /// Header-only file parses to an empty frame
    #[test]
    fn test_header_only_csv() {
        let csv_content = "price,latitude,longitude,last_review\n";

        let temp_file = create_temp_csv(csv_content);
        let df = parse_listings_csv(temp_file.path()).unwrap();
        assert_eq!(df.height(), 0);
    }

    /// Empty cells come back as nulls
    #[test]
    fn test_empty_cells_are_null() {
        let csv_content = "price,latitude,longitude,last_review,reviews_per_month\n\
            10,40.7,-73.9,,\n";

        let temp_file = create_temp_csv(csv_content);
        let df = parse_listings_csv(temp_file.path()).unwrap();
        assert_eq!(df.column("last_review").unwrap().null_count(), 1);
    }

    /// Nonexistent file is a parse error
    #[test]
    fn test_nonexistent_file() {
        let result = parse_listings_csv(std::path::Path::new("/nonexistent/listings.csv"));
        assert!(matches!(result, Err(CleaningError::Parse { .. })));
    }
}
