/// Instruction sent with every document. Spells out the exact JSON shape the
/// handler hands back to callers.
pub const EXTRACTION_PROMPT: &str = r#"
You are given a document containing invoice-related data. Extract the information and return a structured JSON response.
Ensure every required field is present; if a field is missing, set its value as "NA".
The response **must only contain JSON**, without any additional text or explanation.

**Extract the following data:**

**Invoices**: Extract invoices with these columns:
  - serialNumber
  - customerName
  - productName
  - quantity
  - tax
  - totalAmount
  - date

**Products**: Extract product details with these fields:
  - name
  - quantity
  - unitPrice
  - tax
  - priceWithTax
  - (Optional) discount

**Customers**: Extract customer data with:
  - customerName
  - phoneNumber
  - totalPurchaseAmount

**Return the response in the following JSON format:**

{
  "invoices": [
    {
      "serialNumber": "123456",
      "customerName": "John Doe",
      "productName": "Laptop",
      "quantity": "2",
      "tax": "10%",
      "totalAmount": "$2000",
      "date": "2024-02-21"
    }
  ],
  "products": [
    {
      "name": "Laptop",
      "quantity": "2",
      "unitPrice": "$900",
      "tax": "10%",
      "priceWithTax": "$990",
      "discount": "NA"
    }
  ],
  "customers": [
    {
      "customerName": "John Doe",
      "phoneNumber": "123-456-7890",
      "totalPurchaseAmount": "$2000"
    }
  ]
}

**Process this document and return the structured JSON output:**
"#;

/// Top-level arrays the prompt asks for
pub const RESULT_SECTIONS: [&str; 3] = ["invoices", "products", "customers"];
