mod applications;

pub use applications::ApplicationsEndpoint;
