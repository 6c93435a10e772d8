pub mod mock_observer;
