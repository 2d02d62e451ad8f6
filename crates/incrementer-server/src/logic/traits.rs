//! The logic-related traits.

/// A single logic operation, invoked with its request.
#[async_trait::async_trait]
pub trait LogicOp<Request> {
    /// The operation response.
    type Response;
    /// The operation error.
    type Error;

    /// Execute the operation.
    async fn call(&self, req: Request) -> Result<Self::Response, Self::Error>;
}
